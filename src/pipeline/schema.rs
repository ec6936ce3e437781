//! The one declaration of which columns the pipeline understands.
//!
//! Stages never test column membership on their own. The schema is checked once
//! against a table to build a [`Shape`], and every stage asks the shape.

use crate::error::{PortcallError, Result};
use polars::prelude::DataFrame;
use std::collections::BTreeSet;

pub const ANCHORAGE_DT: &str = "ANCHORAGE_DT";
pub const BERTHING_DATE: &str = "BERTHING_DATE";
pub const SAILED_DT: &str = "SAILED_DT";
pub const REG_DT: &str = "REG_DT";
pub const VESSEL_NAME: &str = "VESSEL_NAME";
pub const CARGO_TONNAGE: &str = "CARGO_TONNAGE";
pub const VESSEL_NO: &str = "VESSEL_NO";
pub const VESSEL_CALL_ID: &str = "VESSEL_CALL_ID";
pub const BERTHING_BERTH_CODE: &str = "BERTHING_BERTH_CODE";
pub const TURNAROUND_HOURS: &str = "TURNAROUND_HOURS";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    /// Day-first calendar timestamp, null when unparseable.
    Timestamp,
    /// Free text, whitespace-stripped and title-cased.
    Name,
    /// Opaque identifier carried through untouched.
    Identifier,
    /// Floating-point quantity, null when unparseable.
    Numeric,
    /// Computed by the pipeline, never read from input.
    Derived,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Requirement {
    Required,
    Optional,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub requirement: Requirement,
}

const fn spec(name: &'static str, kind: ColumnKind, requirement: Requirement) -> ColumnSpec {
    ColumnSpec {
        name,
        kind,
        requirement,
    }
}

/// Expected columns of a port-call export, in export order.
pub const VESSEL_CALL_SCHEMA: [ColumnSpec; 10] = [
    spec(VESSEL_NO, ColumnKind::Identifier, Requirement::Optional),
    spec(VESSEL_NAME, ColumnKind::Name, Requirement::Optional),
    spec(VESSEL_CALL_ID, ColumnKind::Identifier, Requirement::Optional),
    spec(BERTHING_BERTH_CODE, ColumnKind::Identifier, Requirement::Optional),
    spec(ANCHORAGE_DT, ColumnKind::Timestamp, Requirement::Optional),
    spec(BERTHING_DATE, ColumnKind::Timestamp, Requirement::Optional),
    spec(SAILED_DT, ColumnKind::Timestamp, Requirement::Optional),
    spec(REG_DT, ColumnKind::Timestamp, Requirement::Optional),
    spec(CARGO_TONNAGE, ColumnKind::Numeric, Requirement::Required),
    spec(TURNAROUND_HOURS, ColumnKind::Derived, Requirement::Optional),
];

/// Columns projected by the active-vessels view.
pub const ACTIVE_VESSEL_COLUMNS: [&str; 5] = [
    VESSEL_NO,
    VESSEL_NAME,
    VESSEL_CALL_ID,
    BERTHING_DATE,
    BERTHING_BERTH_CODE,
];

pub fn columns_of_kind(kind: ColumnKind) -> impl Iterator<Item = &'static ColumnSpec> {
    VESSEL_CALL_SCHEMA.iter().filter(move |c| c.kind == kind)
}

/// The declared columns present in a particular table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Shape {
    present: BTreeSet<&'static str>,
}

impl Shape {
    pub fn of(df: &DataFrame) -> Self {
        let names = df.get_column_names();
        let present = VESSEL_CALL_SCHEMA
            .iter()
            .filter(|spec| names.iter().any(|n| n.as_str() == spec.name))
            .map(|spec| spec.name)
            .collect();
        Self { present }
    }

    pub fn has(&self, name: &str) -> bool {
        self.present.contains(name)
    }

    pub fn has_all(&self, names: &[&str]) -> bool {
        names.iter().all(|n| self.has(n))
    }

    pub fn require(&self, name: &str) -> Result<()> {
        if self.has(name) {
            Ok(())
        } else {
            Err(PortcallError::MissingColumn(name.to_owned()))
        }
    }

    /// Absent columns the schema marks as required.
    pub fn missing_required(&self) -> Vec<&'static str> {
        VESSEL_CALL_SCHEMA
            .iter()
            .filter(|spec| spec.requirement == Requirement::Required && !self.has(spec.name))
            .map(|spec| spec.name)
            .collect()
    }

    pub(crate) fn mark_present(&mut self, name: &'static str) {
        self.present.insert(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_shape_ignores_undeclared_columns() -> anyhow::Result<()> {
        let df = df!(
            VESSEL_NAME => &["Aurora"],
            "PILOT_ON_BOARD" => &["yes"]
        )?;
        let shape = Shape::of(&df);
        assert!(shape.has(VESSEL_NAME));
        assert!(!shape.has("PILOT_ON_BOARD"));
        Ok(())
    }

    #[test]
    fn test_missing_required_reports_tonnage() -> anyhow::Result<()> {
        let df = df!(VESSEL_NAME => &["Aurora"])?;
        let shape = Shape::of(&df);
        assert_eq!(shape.missing_required(), vec![CARGO_TONNAGE]);
        assert!(matches!(
            shape.require(CARGO_TONNAGE),
            Err(PortcallError::MissingColumn(name)) if name == CARGO_TONNAGE
        ));
        Ok(())
    }

    #[test]
    fn test_four_timestamp_columns_declared() {
        let names: Vec<_> = columns_of_kind(ColumnKind::Timestamp).map(|c| c.name).collect();
        assert_eq!(names, vec![ANCHORAGE_DT, BERTHING_DATE, SAILED_DT, REG_DT]);
    }
}
