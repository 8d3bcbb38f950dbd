//! Traits describing read-only collaborators of the rules.
//!
//! Oracles expose static map geometry, field of view, pathfinding, and
//! randomness. The [`Env`] aggregate bundles them so the engine can access
//! everything it needs without hard coupling to concrete implementations.
mod error;
mod map;
mod rng;
mod vision;

pub use error::OracleError;
pub use map::{MapDimensions, MapOracle, StaticTile, TerrainKind};
pub use rng::{PcgRng, RngOracle, compute_seed, context as rng_context};
pub use vision::{FovOracle, PathOracle};

/// Aggregates read-only oracles required by the engine and behaviors.
pub struct Env<'a, M, F, P, R>
where
    M: MapOracle + ?Sized,
    F: FovOracle + ?Sized,
    P: PathOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    map: Option<&'a M>,
    fov: Option<&'a F>,
    path: Option<&'a P>,
    rng: Option<&'a R>,
}

impl<M, F, P, R> Clone for Env<'_, M, F, P, R>
where
    M: MapOracle + ?Sized,
    F: FovOracle + ?Sized,
    P: PathOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<M, F, P, R> Copy for Env<'_, M, F, P, R>
where
    M: MapOracle + ?Sized,
    F: FovOracle + ?Sized,
    P: PathOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

pub type GameEnv<'a> =
    Env<'a, dyn MapOracle + 'a, dyn FovOracle + 'a, dyn PathOracle + 'a, dyn RngOracle + 'a>;

impl<'a, M, F, P, R> Env<'a, M, F, P, R>
where
    M: MapOracle + ?Sized,
    F: FovOracle + ?Sized,
    P: PathOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(
        map: Option<&'a M>,
        fov: Option<&'a F>,
        path: Option<&'a P>,
        rng: Option<&'a R>,
    ) -> Self {
        Self {
            map,
            fov,
            path,
            rng,
        }
    }

    pub fn with_all(map: &'a M, fov: &'a F, path: &'a P, rng: &'a R) -> Self {
        Self::new(Some(map), Some(fov), Some(path), Some(rng))
    }

    pub fn empty() -> Self {
        Self::new(None, None, None, None)
    }

    /// # Errors
    ///
    /// Returns `OracleError::MapNotAvailable` if no map oracle was provided.
    pub fn map(&self) -> Result<&'a M, OracleError> {
        self.map.ok_or(OracleError::MapNotAvailable)
    }

    pub fn fov(&self) -> Result<&'a F, OracleError> {
        self.fov.ok_or(OracleError::FovNotAvailable)
    }

    pub fn path(&self) -> Result<&'a P, OracleError> {
        self.path.ok_or(OracleError::PathNotAvailable)
    }

    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }
}

impl<'a, M, F, P, R> Env<'a, M, F, P, R>
where
    M: MapOracle + 'a,
    F: FovOracle + 'a,
    P: PathOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv`.
    pub fn into_game_env(self) -> GameEnv<'a> {
        let map: Option<&'a dyn MapOracle> = self.map.map(|map| map as _);
        let fov: Option<&'a dyn FovOracle> = self.fov.map(|fov| fov as _);
        let path: Option<&'a dyn PathOracle> = self.path.map(|path| path as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        Env::new(map, fov, path, rng)
    }
}
