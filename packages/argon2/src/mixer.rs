//! The memory-hard mixing primitive
//!
//! [`Mixer`] is the seam between the record logic and the Argon2 core.
//! [`Argon2Mixer`] backs it with the RustCrypto `argon2` crate.

use crate::error::MixingError;
use crate::params::ParamSet;
use crate::variant::Version;
use argon2::{Argon2, Block, Params};
use zeroize::Zeroizing;

/// Runs Argon2 over a password and salt.
///
/// Implementations must be pure: identical inputs always fill `out` with
/// identical bytes. `out.len()` is the requested hash length and takes
/// precedence over `params.hash_len`.
pub trait Mixer: Send + Sync {
    /// Fill `out` with the raw Argon2 output
    ///
    /// # Errors
    ///
    /// Returns the primitive's own failure code, e.g. memory or lane limits.
    fn mix(
        &self,
        version: Version,
        params: &ParamSet,
        password: &[u8],
        salt: &[u8],
        out: &mut [u8],
    ) -> Result<(), MixingError>;
}

impl<M: Mixer + ?Sized> Mixer for &M {
    fn mix(
        &self,
        version: Version,
        params: &ParamSet,
        password: &[u8],
        salt: &[u8],
        out: &mut [u8],
    ) -> Result<(), MixingError> {
        (**self).mix(version, params, password, salt, out)
    }
}

impl<M: Mixer + ?Sized> Mixer for std::sync::Arc<M> {
    fn mix(
        &self,
        version: Version,
        params: &ParamSet,
        password: &[u8],
        salt: &[u8],
        out: &mut [u8],
    ) -> Result<(), MixingError> {
        (**self).mix(version, params, password, salt, out)
    }
}

/// Mixer backed by the `argon2` crate.
///
/// The working area is reserved up front, so an oversized `m_cost` comes
/// back as [`MixingError::MemoryAllocation`] rather than aborting.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Mixer;

impl Mixer for Argon2Mixer {
    fn mix(
        &self,
        version: Version,
        params: &ParamSet,
        password: &[u8],
        salt: &[u8],
        out: &mut [u8],
    ) -> Result<(), MixingError> {
        let primitive_params = Params::new(
            params.m_cost,
            params.t_cost,
            params.parallelism,
            Some(out.len()),
        )?;
        let mut memory: Vec<Block> = Vec::new();
        memory
            .try_reserve_exact(primitive_params.block_count())
            .map_err(|_| MixingError::MemoryAllocation)?;
        memory.resize(primitive_params.block_count(), Block::default());

        let argon2 = Argon2::new(params.variant.into(), version.into(), primitive_params);
        argon2.hash_password_into_with_memory(password, salt, out, &mut memory)?;
        Ok(())
    }
}

/// Zeroed output buffer of `len` bytes, wiped on drop
pub(crate) fn output_buffer(len: u32) -> Result<Zeroizing<Vec<u8>>, MixingError> {
    let len = usize::try_from(len).map_err(|_| MixingError::OutputTooLong)?;
    let mut out = Vec::new();
    out.try_reserve_exact(len)
        .map_err(|_| MixingError::MemoryAllocation)?;
    out.resize(len, 0);
    Ok(Zeroizing::new(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::Variant;

    fn small(variant: Variant) -> ParamSet {
        ParamSet::new(1, 8, 1, 16, variant).unwrap()
    }

    #[test]
    fn output_is_deterministic_and_variant_specific() {
        let mut a = [0u8; 16];
        let mut b = [0u8; 16];
        let mut c = [0u8; 16];
        let mixer = Argon2Mixer;
        mixer
            .mix(Version::V0x13, &small(Variant::Argon2i), b"pw", b"saltsalt", &mut a)
            .unwrap();
        mixer
            .mix(Version::V0x13, &small(Variant::Argon2i), b"pw", b"saltsalt", &mut b)
            .unwrap();
        mixer
            .mix(Version::V0x13, &small(Variant::Argon2id), b"pw", b"saltsalt", &mut c)
            .unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn primitive_limits_are_reported() {
        let mixer = Argon2Mixer;
        let mut out = [0u8; 16];

        let err = mixer
            .mix(Version::V0x13, &small(Variant::Argon2i), b"pw", b"short", &mut out)
            .unwrap_err();
        assert_eq!(err, MixingError::SaltTooShort);

        let starved = ParamSet::new(1, 8, 4, 16, Variant::Argon2i).unwrap();
        let err = mixer
            .mix(Version::V0x13, &starved, b"pw", b"saltsalt", &mut out)
            .unwrap_err();
        assert_eq!(err, MixingError::MemoryTooLittle);

        let mut tiny = [0u8; 2];
        let err = mixer
            .mix(Version::V0x13, &small(Variant::Argon2i), b"pw", b"saltsalt", &mut tiny)
            .unwrap_err();
        assert_eq!(err, MixingError::OutputTooShort);
    }
}
