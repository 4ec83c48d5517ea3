//! Campus locations: reference types, the building directory, resolution
//! of references to coordinates, and building popup info.

pub mod directory;
pub mod place_info;
pub mod resolver;
pub mod types;

pub use directory::{BuildingDirectory, CampusDirectory, DirectoryError};
pub use place_info::{PlaceInfo, PlaceInfoError, PlaceInfoService};
pub use resolver::{Endpoint, LocationResolver, ResolveError};
pub use types::{CoordinateFrame, GeoCoordinate, IndoorGrid, LocationReference, Place};
