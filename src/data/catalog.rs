//! Weekly Petroleum Status Report preset.
//!
//! Identifier → nickname pairs for the headline U.S. inventory and balance
//! series, in report order.

use crate::domain::SeriesRequest;

pub const WEEKLY_PETROLEUM: &[(&str, &str)] = &[
    ("PET.WCESTUS1.W", "Crude Oil ex SPR"),
    ("PET.WCSSTUS1.W", "SPR"),
    ("PET.WCRSTUS1.W", "Crude Oil incl SPR"),
    ("PET.W_EPC0_SAX_YCUOK_MBBL.W", "Cushing"),
    ("PET.WGTSTUS1.W", "Total Gasoline"),
    ("PET.WDISTUS1.W", "Distillate"),
    ("PET.WKJSTUS1.W", "Jet Fuel"),
    ("PET.WRESTUS1.W", "Residual Fuel"),
    ("PET.WPRSTUS1.W", "Propane"),
    ("PET.W_EPOOXE_SAE_NUS_MBBL.W", "Fuel Ethanol"),
    ("PET.WTESTUS1.W", "Total ex SPR"),
    ("PET.WTTSTUS1.W", "Total incl SPR"),
    ("PET.WCRFPUS2.W", "Crude Production"),
    ("PET.WCRIMUS2.W", "Crude Imports"),
    ("PET.WCREXUS2.W", "Crude Exports"),
    ("PET.WCRRIUS2.W", "Refiner Crude Input"),
    ("PET.WPULEUS3.W", "Refinery Utilization"),
    ("PET.WGFUPUS2.W", "Gasoline Supplied"),
    ("PET.WRPUPUS2.W", "Total Products Supplied"),
];

pub fn weekly_petroleum_request() -> SeriesRequest {
    SeriesRequest::with_nicknames(WEEKLY_PETROLEUM.iter().copied())
}
