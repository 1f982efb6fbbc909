//! Display helpers for scan results and station status.

use crate::types::constants::{frequency, signal_level};

/// Maps a `freq=` value from `STATUS` or `BSS` to its 802.11 channel number.
///
/// Frequencies off the 5 MHz raster or outside the 2.4, 5 and 6 GHz bands
/// have no channel.
pub(crate) fn channel_from_freq(mhz: u32) -> Option<u16> {
    if mhz == frequency::BAND_2_4_CH14 {
        return Some(14);
    }

    let base = match mhz {
        frequency::BAND_2_4_START..=frequency::BAND_2_4_END => frequency::BAND_2_4_BASE,
        frequency::BAND_5_START..=frequency::BAND_5_END => frequency::BAND_5_BASE,
        frequency::BAND_6_START..=frequency::BAND_6_END => frequency::BAND_6_BASE,
        _ => return None,
    };

    let offset = mhz - base;
    if offset % frequency::CHANNEL_SPACING != 0 {
        return None;
    }
    u16::try_from(offset / frequency::CHANNEL_SPACING).ok()
}

/// Four-cell signal meter for a `level=` value in dBm.
///
/// One cell is always lit; thresholds are in [`signal_level`].
pub(crate) fn bars_from_level(dbm: i32) -> &'static str {
    if dbm >= signal_level::BAR_4_MIN {
        "▂▄▆█"
    } else if dbm >= signal_level::BAR_3_MIN {
        "▂▄▆_"
    } else if dbm >= signal_level::BAR_2_MIN {
        "▂▄__"
    } else {
        "▂___"
    }
}
