pub mod atom;
pub mod light_source;
pub mod photon;
pub mod wavelength;
