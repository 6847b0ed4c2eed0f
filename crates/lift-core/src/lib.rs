//! `lift-core` — foundational types for the `lift_sim` elevator dispatch
//! simulation.
//!
//! This crate is a dependency of every other `lift-*` crate.  It has no
//! `lift-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `ElevatorId`, `RequestId`                             |
//! | [`floor`]       | `Floor`, `Direction`                                  |
//! | [`request`]     | `Request` — one pickup/drop-off unit of work          |
//! | [`event`]       | `ElevatorEvent`, `EventKind`                          |
//! | [`config`]      | `DispatchConfig`                                      |
//! | [`rng`]         | `SimRng` (request generation)                         |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, floors and config.  |

pub mod config;
pub mod error;
pub mod event;
pub mod floor;
pub mod ids;
pub mod request;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::DispatchConfig;
pub use error::{CoreError, CoreResult};
pub use event::{ElevatorEvent, EventKind};
pub use floor::{Direction, Floor};
pub use ids::{ElevatorId, RequestId};
pub use request::Request;
pub use rng::SimRng;
