//! ChargePoint fleet map refresher.
//!
//! Pulls every station in a search area from the ChargePoint SOAP API,
//! polls each station's live status, and writes two CSV files: a full
//! per-station cache and a slim table of placeable stations with their
//! latest status, ready for a map layer.

pub mod catalog;
pub mod chargepoint;
pub mod config;
pub mod domain;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod status;
