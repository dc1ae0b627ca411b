//! Instrument selector generators.

use fido_attrs::{Attr, Instrument, Level};
use proptest::prelude::*;

/// Instruments whose clients answer queries without network access.
pub const OFFLINE_INSTRUMENTS: &[&str] = &["lyra", "norh", "noaa-indices", "noaa-predict", "goes"];

/// Instruments whose clients must contact a remote archive.
pub const ONLINE_INSTRUMENTS: &[&str] = &["rhessi"];

/// Strategy for generating instrument selectors that can be queried offline.
///
/// Yields one of [`OFFLINE_INSTRUMENTS`] or the compound `Instrument(eve) & Level(0)`.
pub fn offline_instruments() -> impl Strategy<Value = Attr> {
    prop_oneof![
        prop::sample::select(OFFLINE_INSTRUMENTS).prop_map(|name| Attr::from(Instrument::new(name))),
        Just(Instrument::new("eve") & Level(0)),
    ]
}

/// Strategy for generating instrument selectors that need the network.
pub fn online_instruments() -> impl Strategy<Value = Attr> {
    prop::sample::select(ONLINE_INSTRUMENTS).prop_map(|name| Attr::from(Instrument::new(name)))
}
