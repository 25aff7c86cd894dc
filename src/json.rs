// Copyright 2026 the vgkit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON and flat-number encodings of curves and paths.
//!
//! A path serializes as an array of curve objects with named points. On
//! input each curve may also be given as a 4-point array in the order
//! `[start, end, start control, end control]`. The reduced list is a flat
//! array of coordinates in which shared joints appear only once.

use serde::{Deserialize, Serialize};

use crate::common::round_to_digits;
use crate::{BezPath, CubicBez, Error, Point, Result};

/// A curve with named points, as it appears in JSON.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct CurveObject {
    /// The start point.
    pub start_point: Point,
    /// The end point.
    pub end_point: Point,
    /// The control point attached to the start point.
    pub start_control_point: Point,
    /// The control point attached to the end point.
    pub end_control_point: Point,
}

/// One curve of a path in either accepted input shape.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CurveRecord {
    /// A curve with named points.
    Object(CurveObject),
    /// `[start, end, start control, end control]`; entries may be missing
    /// in malformed input.
    Tuple(Vec<Option<Point>>),
}

impl From<&CubicBez> for CurveObject {
    fn from(c: &CubicBez) -> Self {
        CurveObject {
            start_point: c.p0,
            end_point: c.p3,
            start_control_point: c.p1,
            end_control_point: c.p2,
        }
    }
}

impl From<CurveObject> for CubicBez {
    fn from(c: CurveObject) -> Self {
        CubicBez::new(
            c.start_point,
            c.start_control_point,
            c.end_control_point,
            c.end_point,
        )
    }
}

impl CurveRecord {
    fn into_curve(self, index: usize) -> Result<CubicBez> {
        match self {
            CurveRecord::Object(obj) => Ok(obj.into()),
            CurveRecord::Tuple(points) => {
                let [start, end, start_control, end_control]: [Option<Point>; 4] =
                    points.try_into().map_err(|_| Error::MalformedCurve {
                        index,
                        reason: "expected exactly 4 points",
                    })?;
                match (start, end, start_control, end_control) {
                    (Some(p0), Some(p3), Some(p1), Some(p2)) => Ok(CubicBez::new(p0, p1, p2, p3)),
                    _ => Err(Error::MalformedCurve {
                        index,
                        reason: "missing point",
                    }),
                }
            }
        }
    }
}

impl CubicBez {
    /// The curve in its JSON object form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&CurveObject::from(self))?)
    }

    /// Parse a curve from its JSON object or 4-point array form.
    ///
    /// # Errors
    ///
    /// Fails on invalid JSON and on arrays that do not hold exactly four
    /// points.
    pub fn from_json(json: &str) -> Result<CubicBez> {
        let record: CurveRecord = serde_json::from_str(json)?;
        record.into_curve(0)
    }
}

impl BezPath {
    /// Serialize the path as a JSON array of curve objects.
    pub fn to_json(&self) -> Result<String> {
        let curves: Vec<CurveObject> = self.curves().map(|c| CurveObject::from(&c)).collect();
        Ok(serde_json::to_string(&curves)?)
    }

    /// Parse a path from a JSON array of curves.
    ///
    /// # Errors
    ///
    /// Fails on invalid JSON or any malformed curve; see
    /// [`BezPath::from_array`].
    pub fn from_json(json: &str) -> Result<BezPath> {
        let records: Vec<CurveRecord> = serde_json::from_str(json)?;
        BezPath::from_array(records)
    }

    /// Build a path from decoded curve records.
    ///
    /// Each curve after the first is connected to its predecessor, as in
    /// [`BezPath::from_curves`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedCurve`] for a tuple without exactly four
    /// present points.
    pub fn from_array(records: impl IntoIterator<Item = CurveRecord>) -> Result<BezPath> {
        let curves = records
            .into_iter()
            .enumerate()
            .map(|(i, r)| r.into_curve(i))
            .collect::<Result<Vec<_>>>()?;
        Ok(BezPath::from_curves(curves))
    }

    /// Flatten the path into coordinates rounded to `digits` decimals.
    ///
    /// Each curve contributes its start point, start control point and end
    /// control point; the final end point closes the list. The result has
    /// `6 * n + 2` entries for `n` curves.
    pub fn to_reduced_list(&self, digits: u32) -> Vec<f64> {
        let mut values = Vec::with_capacity(6 * self.curve_count() + 2);
        let mut last = None;
        for c in self.curves() {
            for p in [c.p0, c.p1, c.p2] {
                values.push(round_to_digits(p.x, digits));
                values.push(round_to_digits(p.y, digits));
            }
            last = Some(c.p3);
        }
        if let Some(p) = last {
            values.push(round_to_digits(p.x, digits));
            values.push(round_to_digits(p.y, digits));
        }
        values
    }

    /// The reduced list as a JSON array string.
    pub fn to_reduced_list_representation(&self, digits: u32) -> Result<String> {
        Ok(serde_json::to_string(&self.to_reduced_list(digits))?)
    }

    /// Rebuild a path from its reduced list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReducedListTooShort`] for fewer than 8 values and
    /// [`Error::ReducedListMisaligned`] if the values do not form whole
    /// curves.
    pub fn from_reduced_list(values: &[f64]) -> Result<BezPath> {
        let len = values.len();
        if len < 8 {
            return Err(Error::ReducedListTooShort { len });
        }
        if (len - 2) % 6 != 0 {
            return Err(Error::ReducedListMisaligned { len });
        }
        let point = |i: usize| Point::new(values[i], values[i + 1]);
        let curves = (0..(len - 2) / 6).map(|k| {
            let base = 6 * k;
            CubicBez::new(point(base), point(base + 2), point(base + 4), point(base + 6))
        });
        Ok(BezPath::from_curves(curves))
    }

    /// Rebuild a path from the JSON array form of its reduced list.
    pub fn from_reduced_list_representation(json: &str) -> Result<BezPath> {
        let values: Vec<f64> = serde_json::from_str(json)?;
        BezPath::from_reduced_list(&values)
    }
}

#[cfg(test)]
mod tests {
    use crate::{BezPath, CubicBez, CurvePointRole, Error, Point};

    fn path() -> BezPath {
        BezPath::from_curves([
            CubicBez::new((0.0, 0.0), (10.0, 20.0), (30.0, 20.0), (40.0, 0.0)),
            CubicBez::new((40.0, 0.0), (50.0, -20.0), (70.0, -20.0), (80.0, 0.0)),
        ])
    }

    #[test]
    fn curve_object_keys() {
        let c = CubicBez::new((0.0, 0.0), (1.0, 2.0), (3.0, 4.0), (5.0, 6.0));
        let json = c.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["startPoint"]["x"], 0.0);
        assert_eq!(value["startControlPoint"]["y"], 2.0);
        assert_eq!(value["endControlPoint"]["x"], 3.0);
        assert_eq!(value["endPoint"]["y"], 6.0);
        assert_eq!(CubicBez::from_json(&json).unwrap(), c);
    }

    #[test]
    fn path_json_round_trip() {
        let p = path();
        let parsed = BezPath::from_json(&p.to_json().unwrap()).unwrap();
        assert_eq!(parsed, p);
        assert_eq!(
            parsed.point_index(0, CurvePointRole::EndPoint),
            parsed.point_index(1, CurvePointRole::StartPoint)
        );
    }

    #[test]
    fn round_trips_keep_length() {
        let p = BezPath::from_curves([
            CubicBez::new((1.25, 3.5), (20.125, 40.0), (33.75, -12.5), (50.0, 7.25)),
            CubicBez::new((50.0, 7.25), (66.25, 27.0), (81.5, 2.0), (99.875, 14.5)),
        ]);
        let from_json = BezPath::from_json(&p.to_json().unwrap()).unwrap();
        assert!((from_json.length() - p.length()).abs() < 1e-6);
        let repr = p.to_reduced_list_representation(6).unwrap();
        let from_list = BezPath::from_reduced_list_representation(&repr).unwrap();
        assert!((from_list.length() - p.length()).abs() < 1e-6);
        assert_eq!(from_list, p);
    }

    #[test]
    fn tuple_records() {
        let json = r#"[
            [{"x": 0, "y": 0}, {"x": 40, "y": 0}, {"x": 10, "y": 20}, {"x": 30, "y": 20}],
            [[40, 0], [80, 0], [50, -20], [70, -20]]
        ]"#;
        assert_eq!(BezPath::from_json(json).unwrap(), path());
    }

    #[test]
    fn malformed_tuples() {
        let short = r#"[[[0, 0], [1, 1], [2, 2]]]"#;
        assert!(matches!(
            BezPath::from_json(short),
            Err(Error::MalformedCurve { index: 0, .. })
        ));
        let missing = r#"[[[0, 0], [1, 1], [2, 2], [3, 3]], [[3, 3], null, [4, 4], [5, 5]]]"#;
        assert!(matches!(
            BezPath::from_json(missing),
            Err(Error::MalformedCurve { index: 1, .. })
        ));
        assert!(matches!(BezPath::from_json("{"), Err(Error::Json(_))));
    }

    #[test]
    fn reduced_list_layout() {
        let list = path().to_reduced_list(3);
        assert_eq!(
            list,
            vec![
                0.0, 0.0, 10.0, 20.0, 30.0, 20.0, //
                40.0, 0.0, 50.0, -20.0, 70.0, -20.0, //
                80.0, 0.0
            ]
        );
        assert_eq!(BezPath::from_reduced_list(&list).unwrap(), path());
    }

    #[test]
    fn reduced_list_rounds() {
        let p = BezPath::from_curves([CubicBez::new(
            (0.123456, 1.0),
            (2.0, 3.98765),
            (4.0, 5.0),
            (6.5, 7.0),
        )]);
        let list = p.to_reduced_list(2);
        assert_eq!(list[0], 0.12);
        assert_eq!(list[3], 3.99);
        let repr = p.to_reduced_list_representation(2).unwrap();
        let back = BezPath::from_reduced_list_representation(&repr).unwrap();
        assert_eq!(back.curve(0).unwrap().p3, Point::new(6.5, 7.0));
    }

    #[test]
    fn reduced_list_with_excess_digits() {
        let p = path();
        let repr = p.to_reduced_list_representation(400).unwrap();
        assert!(!repr.contains("null"));
        assert_eq!(BezPath::from_reduced_list_representation(&repr).unwrap(), p);
    }

    #[test]
    fn reduced_list_errors() {
        assert!(matches!(
            BezPath::from_reduced_list(&[0.0; 6]),
            Err(Error::ReducedListTooShort { len: 6 })
        ));
        assert!(matches!(
            BezPath::from_reduced_list(&[0.0; 9]),
            Err(Error::ReducedListMisaligned { len: 9 })
        ));
        assert!(BezPath::from_reduced_list(&[0.0; 14]).is_ok());
    }
}
