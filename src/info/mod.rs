//! Telemetry decoding
//!
//! Maps an information ID, under the active broadcast system, to a title
//! and a display value:
//! 1. IDs below `COMMON_END` use the common table for every system
//! 2. Other IDs use the table of the system's family
//! 3. Anything unmapped shows as "Not Defined"

pub mod ids;
mod tables;
pub mod textlist;

use std::borrow::Cow;
use std::ops::Range;

use crate::dmd::{DemodParameter, Standard};

pub use ids::InfoId;
pub use tables::{InfoEntry, InfoTable, ValueFormat};
pub use textlist::{TextList, NOT_DEFINED};

/// Decoder table for a broadcast system, if it has one
pub fn table_for(standard: Standard) -> Option<&'static InfoTable> {
    match standard {
        Standard::Dvbt => Some(&tables::DVBT),
        Standard::Dvbt2 => Some(&tables::DVBT2),
        Standard::Dvbc => Some(&tables::DVBC),
        Standard::Isdbt | Standard::IsdbtBrazil => Some(&tables::ISDBT),
        Standard::Isdbs => Some(&tables::ISDBS),
        Standard::Atsc
        | Standard::QamB64
        | Standard::QamB256
        | Standard::QamC64
        | Standard::QamC256 => Some(&tables::VQ),
        Standard::Dvbc2 | Standard::NotDefined => None,
    }
}

/// Where an ID is decoded. Titles and values share this routing.
#[derive(Debug, Clone, Copy)]
enum Route {
    Common(&'static InfoEntry),
    Status(Option<&'static InfoTable>),
    System(&'static InfoEntry),
    Undefined,
}

fn route(standard: Standard, id: InfoId) -> Route {
    if id < ids::COMMON_END {
        if id == ids::STATUS {
            return Route::Status(table_for(standard));
        }
        return Route::Common(&tables::COMMON_ENTRIES[id as usize]);
    }
    table_for(standard)
        .and_then(|table| table.entry(id))
        .map_or(Route::Undefined, Route::System)
}

/// Title of an information ID
pub fn info_title(standard: Standard, id: InfoId) -> &'static str {
    match route(standard, id) {
        Route::Common(entry) | Route::System(entry) => entry.title,
        Route::Status(_) => tables::COMMON_ENTRIES[ids::STATUS as usize].title,
        Route::Undefined => NOT_DEFINED,
    }
}

/// Display text of a raw value for an information ID
pub fn info_value(standard: Standard, id: InfoId, raw: u32) -> Cow<'static, str> {
    match route(standard, id) {
        Route::Common(entry) | Route::System(entry) => entry.format.render(raw),
        Route::Status(Some(table)) => table.status.render(raw),
        Route::Status(None) | Route::Undefined => Cow::Borrowed(NOT_DEFINED),
    }
}

/// Whether `id` is resolved by the common table for every system
pub fn is_common(id: InfoId) -> bool {
    id < ids::COMMON_END
}

/// Display text of the session's own slot for `id`
pub fn value_text(param: &DemodParameter, id: InfoId) -> Cow<'static, str> {
    info_value(param.system, id, param.info(id))
}

/// Every ID that has a title under `standard`, common ones first
pub fn defined_ids(standard: Standard) -> Range<InfoId> {
    let end = table_for(standard).map_or(ids::COMMON_END, |t| t.end());
    0..end
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STANDARDS: [Standard; 13] = [
        Standard::Isdbt,
        Standard::Isdbs,
        Standard::Dvbt,
        Standard::Dvbt2,
        Standard::Dvbc,
        Standard::Dvbc2,
        Standard::Atsc,
        Standard::QamB64,
        Standard::QamB256,
        Standard::QamC64,
        Standard::QamC256,
        Standard::IsdbtBrazil,
        Standard::NotDefined,
    ];

    #[test]
    fn test_common_titles_ignore_standard() {
        for std in ALL_STANDARDS {
            assert_eq!(info_title(std, ids::CNR_INT), "CNR(int)");
            assert_eq!(info_title(std, ids::LOCK), "LOCK");
            assert_eq!(info_title(std, ids::STATUS), "Status");
            assert_eq!(info_value(std, ids::LOCK, 1), "NOSIGNAL");
            assert_eq!(info_value(std, ids::BERRNUM, 123), "123");
        }
    }

    #[test]
    fn test_system_titles() {
        assert_eq!(info_title(Standard::Dvbt, ids::DVBT_SQI), "SQI");
        assert_eq!(info_title(Standard::Dvbt2, ids::DVBT2_GI), "GI");
        assert_eq!(info_title(Standard::Isdbt, ids::ISDBT_MAPA), "Modulation(A)");
        assert_eq!(info_title(Standard::IsdbtBrazil, ids::ISDBT_MAPA), "Modulation(A)");
        assert_eq!(info_title(Standard::Isdbs, ids::ISDBS_TSNO01), "TSNO01");
        assert_eq!(info_title(Standard::Dvbc, ids::COMMON_END), NOT_DEFINED);
        assert_eq!(info_title(Standard::Atsc, ids::COMMON_END), NOT_DEFINED);
    }

    #[test]
    fn test_system_values() {
        assert_eq!(info_value(Standard::Dvbt, ids::DVBT_CONSTELLATION, 2), "64QAM");
        assert_eq!(info_value(Standard::Dvbt, ids::DVBT_LP_CODERATE, 7), NOT_DEFINED);
        assert_eq!(info_value(Standard::Dvbt, ids::DVBT_CELLID, 0x1a2b), "0x1a2b");
        assert_eq!(info_value(Standard::Dvbt2, ids::DVBT2_DAT_PLP_MOD, 3), "256QAM");
        assert_eq!(info_value(Standard::Dvbt2, ids::DVBT2_NETWORK_ID, 255), "0xff");
        assert_eq!(info_value(Standard::Isdbt, ids::ISDBT_EMGFLG, 1), "Yes");
        assert_eq!(info_value(Standard::Isdbs, ids::ISDBS_MOD0, 7), "TC8PSK 2/3");
        assert_eq!(info_value(Standard::Isdbs, ids::ISDBS_TSID3, 16), "0x10");
        assert_eq!(info_value(Standard::Isdbs, ids::ISDBS_TSNO20, 16), "16");
    }

    #[test]
    fn test_status_per_standard() {
        assert_eq!(info_value(Standard::Dvbt, ids::STATUS, 10), "10_Sync");
        assert_eq!(info_value(Standard::Isdbt, ids::STATUS, 11), "11_Sync_Protect");
        assert_eq!(info_value(Standard::Dvbt2, ids::STATUS, 13), "13_Sync");
        assert_eq!(info_value(Standard::Dvbc, ids::STATUS, 3), "3_Rate Search");
        assert_eq!(info_value(Standard::QamB256, ids::STATUS, 77), "77");
        assert_eq!(info_value(Standard::Isdbs, ids::STATUS, 5), "0x5");
        assert_eq!(info_title(Standard::Isdbs, ids::STATUS), "Status");
        assert_eq!(info_value(Standard::NotDefined, ids::STATUS, 0), NOT_DEFINED);
    }

    #[test]
    fn test_dispatch_is_total() {
        for std in ALL_STANDARDS {
            for id in (0..600).chain([u32::MAX - 1, u32::MAX]) {
                let title = info_title(std, id);
                let value = info_value(std, id, u32::MAX);
                assert!(!title.is_empty());
                assert!(!value.is_empty());
            }
        }
    }

    #[test]
    fn test_title_and_value_partition_alike() {
        for std in ALL_STANDARDS {
            for id in 0..600 {
                let titled = info_title(std, id) != NOT_DEFINED;
                let valued = info_value(std, id, 1) != NOT_DEFINED;
                if is_common(id) {
                    assert!(titled, "{:?} id {} lost its common title", std, id);
                } else {
                    assert_eq!(titled, valued, "{:?} id {} routed differently", std, id);
                }
            }
        }
    }

    #[test]
    fn test_defined_ids() {
        assert_eq!(defined_ids(Standard::Dvbt).count() as u32, ids::DVBT_END);
        assert_eq!(defined_ids(Standard::Atsc).count() as u32, ids::COMMON_END);
        assert_eq!(defined_ids(Standard::NotDefined).count() as u32, ids::COMMON_END);
    }

    #[test]
    fn test_value_text_uses_session() {
        let mut param = DemodParameter::new();
        param.system = Standard::Dvbt;
        param.info[ids::DVBT_MODE as usize] = 1;
        assert_eq!(value_text(&param, ids::DVBT_MODE), "8k");
        param.system = Standard::Dvbt2;
        param.info[ids::DVBT2_MODE as usize] = 5;
        assert_eq!(value_text(&param, ids::DVBT2_MODE), "32k");
    }
}
