//! Particle-type predicates over the reconstructed PDG-like code.

/// PDG particle codes used by the reconstruction.
pub mod pdg {
    pub const E_MINUS: i32 = 11;
    pub const NU_E: i32 = 12;
    pub const MU_MINUS: i32 = 13;
    pub const NU_MU: i32 = 14;
    pub const NU_TAU: i32 = 16;
    pub const PHOTON: i32 = 22;
    pub const PI_PLUS: i32 = 211;
    pub const K_PLUS: i32 = 321;
    pub const PROTON: i32 = 2212;
}

/// Track-like particle: muon, charged pion, proton or charged kaon.
#[inline]
pub fn is_track(code: i32) -> bool {
    matches!(
        code.abs(),
        pdg::MU_MINUS | pdg::PI_PLUS | pdg::PROTON | pdg::K_PLUS
    )
}

/// Shower-like particle: electron or photon.
#[inline]
pub fn is_shower(code: i32) -> bool {
    matches!(code.abs(), pdg::E_MINUS | pdg::PHOTON)
}

/// Neutrino of any flavour.
#[inline]
pub fn is_neutrino(code: i32) -> bool {
    matches!(code.abs(), pdg::NU_E | pdg::NU_MU | pdg::NU_TAU)
}
