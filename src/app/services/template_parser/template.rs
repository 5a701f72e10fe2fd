//! Per-template column signatures and cell roles
//!
//! A template is a named partner spreadsheet layout. Its signature lists the
//! columns that must be present verbatim for a sheet to be parsed as that
//! template, and names the cells the parser reads for identification, the
//! vehicle plate, and the route description.

use crate::app::models::TemplateType;
use crate::constants::columns;

/// Column signature and cell roles for one partner template
#[derive(Debug, Clone, Copy)]
pub struct TemplateSignature {
    pub template_type: TemplateType,

    /// Columns that must all be present for the sheet to parse
    pub required_columns: &'static [&'static str],

    /// Columns whose cells identify the trip; a row with all of these
    /// blank is treated as a separator row and skipped
    pub identifying_columns: &'static [&'static str],

    /// Column carrying the vehicle plate, when the template has one.
    /// May name a column outside the required signature (optional column).
    pub plate_column: Option<&'static str>,

    /// Column carrying the route/shift description, when the template has one
    pub route_column: Option<&'static str>,
}

const ROUTE: TemplateSignature = TemplateSignature {
    template_type: TemplateType::Route,
    required_columns: &[
        columns::DATE,
        columns::route::ROUTE_NAME,
        columns::route::DEPARTURE_TAG,
        columns::route::RETURN_TAG,
    ],
    identifying_columns: &[columns::route::DEPARTURE_TAG, columns::route::RETURN_TAG],
    plate_column: Some(columns::route::LICENSE_PLATE),
    route_column: Some(columns::route::ROUTE_NAME),
};

const SHIFT: TemplateSignature = TemplateSignature {
    template_type: TemplateType::Shift,
    required_columns: &[
        columns::DATE,
        columns::shift::SHIFT_NAME,
        columns::shift::TRIP_TAGS,
        columns::shift::VEHICLE,
    ],
    identifying_columns: &[columns::shift::TRIP_TAGS],
    plate_column: Some(columns::shift::VEHICLE),
    route_column: Some(columns::shift::SHIFT_NAME),
};

const PER_LEG: TemplateSignature = TemplateSignature {
    template_type: TemplateType::PerLeg,
    required_columns: &[
        columns::DATE,
        columns::per_leg::LEG_TAG,
        columns::per_leg::DIRECTION,
        columns::per_leg::VEHICLE,
    ],
    identifying_columns: &[columns::per_leg::LEG_TAG],
    plate_column: Some(columns::per_leg::VEHICLE),
    route_column: None,
};

/// Look up the signature for a template type
pub fn signature(template_type: TemplateType) -> &'static TemplateSignature {
    match template_type {
        TemplateType::Route => &ROUTE,
        TemplateType::Shift => &SHIFT,
        TemplateType::PerLeg => &PER_LEG,
    }
}
