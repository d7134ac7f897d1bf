//! TS 23.032 geographical area descriptions.
//!
//! A location estimate is exactly one [`GeographicShape`] variant; each variant carries only the
//! attributes its shape defines, so there is no way to observe a circle's uncertainty on a polygon
//! or an arc's angles on an ellipsoid point.

use bitflags::bitflags;
use core::fmt;

use super::{fmt_flags, Fields};

protocol_enum! {
    /// Type of shape code of a geographical description
    pub enum TypeOfShape {
        EllipsoidPoint = 0 => "ellipsoidPoint",
        EllipsoidPointWithUncertaintyCircle = 1 => "ellipsoidPointWithUncertaintyCircle",
        EllipsoidPointWithUncertaintyEllipse = 3 => "ellipsoidPointWithUncertaintyEllipse",
        Polygon = 5 => "polygon",
        EllipsoidPointWithAltitude = 8 => "ellipsoidPointWithAltitude",
        EllipsoidPointWithAltitudeAndUncertaintyEllipsoid = 9 => "ellipsoidPointWithAltitudeAndUncertaintyElipsoid",
        EllipsoidArc = 10 => "ellipsoidArc",
    }
}

impl TypeOfShape {
    pub const ALL: [TypeOfShape; 7] = [
        TypeOfShape::EllipsoidPoint,
        TypeOfShape::EllipsoidPointWithUncertaintyCircle,
        TypeOfShape::EllipsoidPointWithUncertaintyEllipse,
        TypeOfShape::Polygon,
        TypeOfShape::EllipsoidPointWithAltitude,
        TypeOfShape::EllipsoidPointWithAltitudeAndUncertaintyEllipsoid,
        TypeOfShape::EllipsoidArc,
    ];
}

bitflags! {
    /// `SupportedGADShapes`: the shapes a node declares it can handle.
    ///
    /// This is a capability set, independent of the shape of any particular estimate.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct SupportedShapes: u8 {
        const ELLIPSOID_POINT = 0x01;
        const ELLIPSOID_POINT_WITH_UNCERTAINTY_CIRCLE = 0x02;
        const ELLIPSOID_POINT_WITH_UNCERTAINTY_ELLIPSE = 0x04;
        const POLYGON = 0x08;
        const ELLIPSOID_POINT_WITH_ALTITUDE = 0x10;
        const ELLIPSOID_POINT_WITH_ALTITUDE_AND_UNCERTAINTY_ELLIPSOID = 0x20;
        const ELLIPSOID_ARC = 0x40;
    }
}

impl SupportedShapes {
    pub fn supports(self, shape: TypeOfShape) -> bool {
        self.contains(shape.into())
    }
}

impl From<TypeOfShape> for SupportedShapes {
    fn from(shape: TypeOfShape) -> Self {
        match shape {
            TypeOfShape::EllipsoidPoint => Self::ELLIPSOID_POINT,
            TypeOfShape::EllipsoidPointWithUncertaintyCircle => {
                Self::ELLIPSOID_POINT_WITH_UNCERTAINTY_CIRCLE
            },
            TypeOfShape::EllipsoidPointWithUncertaintyEllipse => {
                Self::ELLIPSOID_POINT_WITH_UNCERTAINTY_ELLIPSE
            },
            TypeOfShape::Polygon => Self::POLYGON,
            TypeOfShape::EllipsoidPointWithAltitude => Self::ELLIPSOID_POINT_WITH_ALTITUDE,
            TypeOfShape::EllipsoidPointWithAltitudeAndUncertaintyEllipsoid => {
                Self::ELLIPSOID_POINT_WITH_ALTITUDE_AND_UNCERTAINTY_ELLIPSOID
            },
            TypeOfShape::EllipsoidArc => Self::ELLIPSOID_ARC,
        }
    }
}

impl FromIterator<TypeOfShape> for SupportedShapes {
    fn from_iter<I: IntoIterator<Item = TypeOfShape>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |acc, shape| acc | Self::from(shape))
    }
}

impl fmt::Display for SupportedShapes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_flags(self, f)
    }
}

/// A point on the WGS 84 ellipsoid
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinates {
    /// Latitude in degrees, positive north
    pub latitude: f64,
    /// Longitude in degrees, positive east
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    fn write_to(&self, fields: &mut Fields<'_, '_>) -> fmt::Result {
        fields.field("latitude", &self.latitude)?;
        fields.field("longitude", &self.longitude)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Horizontal uncertainty ellipse
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UncertaintyEllipse {
    /// Meters
    pub semi_major: f64,
    /// Meters
    pub semi_minor: f64,
    /// Orientation of the major axis in degrees, clockwise from north
    pub orientation: f64,
}

impl UncertaintyEllipse {
    fn write_to(&self, fields: &mut Fields<'_, '_>) -> fmt::Result {
        fields.field("uncertaintySemiMajorAxis", &self.semi_major)?;
        fields.field("uncertaintySemiMinorAxis", &self.semi_minor)?;
        fields.field("angleOfMajorAxis", &self.orientation)
    }
}

/// Closed polygon given by its corners, in order
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    pub points: Vec<Coordinates>,
}

impl Polygon {
    pub fn new(points: Vec<Coordinates>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl FromIterator<Coordinates> for Polygon {
    fn from_iter<I: IntoIterator<Item = Coordinates>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Ellipsoid arc: a ring sector around a center point
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EllipsoidArc {
    pub center: Coordinates,
    /// Meters
    pub inner_radius: f64,
    /// Meters
    pub uncertainty_radius: f64,
    /// Degrees, clockwise from north
    pub offset_angle: f64,
    /// Degrees
    pub included_angle: f64,
    /// Percent
    pub confidence: u8,
}

/// A geographical location estimate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GeographicShape {
    EllipsoidPoint {
        position: Coordinates,
    },
    EllipsoidPointWithUncertaintyCircle {
        position: Coordinates,
        /// Radius in meters
        uncertainty: f64,
    },
    EllipsoidPointWithUncertaintyEllipse {
        position: Coordinates,
        ellipse: UncertaintyEllipse,
        /// Percent
        confidence: u8,
    },
    Polygon(Polygon),
    EllipsoidPointWithAltitude {
        position: Coordinates,
        /// Meters above the ellipsoid, negative for depth
        altitude: i32,
    },
    EllipsoidPointWithAltitudeAndUncertaintyEllipsoid {
        position: Coordinates,
        altitude: i32,
        ellipse: UncertaintyEllipse,
        /// Meters
        uncertainty_altitude: f64,
        confidence: u8,
    },
    EllipsoidArc(EllipsoidArc),
}

impl GeographicShape {
    pub fn point(latitude: f64, longitude: f64) -> Self {
        GeographicShape::EllipsoidPoint {
            position: Coordinates::new(latitude, longitude),
        }
    }

    pub fn circle(latitude: f64, longitude: f64, uncertainty: f64) -> Self {
        GeographicShape::EllipsoidPointWithUncertaintyCircle {
            position: Coordinates::new(latitude, longitude),
            uncertainty,
        }
    }

    pub fn type_of_shape(&self) -> TypeOfShape {
        match self {
            GeographicShape::EllipsoidPoint { .. } => TypeOfShape::EllipsoidPoint,
            GeographicShape::EllipsoidPointWithUncertaintyCircle { .. } => {
                TypeOfShape::EllipsoidPointWithUncertaintyCircle
            },
            GeographicShape::EllipsoidPointWithUncertaintyEllipse { .. } => {
                TypeOfShape::EllipsoidPointWithUncertaintyEllipse
            },
            GeographicShape::Polygon(_) => TypeOfShape::Polygon,
            GeographicShape::EllipsoidPointWithAltitude { .. } => {
                TypeOfShape::EllipsoidPointWithAltitude
            },
            GeographicShape::EllipsoidPointWithAltitudeAndUncertaintyEllipsoid { .. } => {
                TypeOfShape::EllipsoidPointWithAltitudeAndUncertaintyEllipsoid
            },
            GeographicShape::EllipsoidArc(_) => TypeOfShape::EllipsoidArc,
        }
    }

    /// Point position, or the arc center. `None` for a polygon.
    pub fn position(&self) -> Option<Coordinates> {
        match self {
            GeographicShape::EllipsoidPoint { position }
            | GeographicShape::EllipsoidPointWithUncertaintyCircle { position, .. }
            | GeographicShape::EllipsoidPointWithUncertaintyEllipse { position, .. }
            | GeographicShape::EllipsoidPointWithAltitude { position, .. }
            | GeographicShape::EllipsoidPointWithAltitudeAndUncertaintyEllipsoid {
                position, ..
            } => Some(*position),
            GeographicShape::EllipsoidArc(arc) => Some(arc.center),
            GeographicShape::Polygon(_) => None,
        }
    }

    /// Uncertainty circle radius
    pub fn uncertainty(&self) -> Option<f64> {
        match self {
            GeographicShape::EllipsoidPointWithUncertaintyCircle { uncertainty, .. } => {
                Some(*uncertainty)
            },
            _ => None,
        }
    }

    pub fn uncertainty_ellipse(&self) -> Option<&UncertaintyEllipse> {
        match self {
            GeographicShape::EllipsoidPointWithUncertaintyEllipse { ellipse, .. }
            | GeographicShape::EllipsoidPointWithAltitudeAndUncertaintyEllipsoid {
                ellipse, ..
            } => Some(ellipse),
            _ => None,
        }
    }

    pub fn altitude(&self) -> Option<i32> {
        match self {
            GeographicShape::EllipsoidPointWithAltitude { altitude, .. }
            | GeographicShape::EllipsoidPointWithAltitudeAndUncertaintyEllipsoid {
                altitude, ..
            } => Some(*altitude),
            _ => None,
        }
    }

    pub fn uncertainty_altitude(&self) -> Option<f64> {
        match self {
            GeographicShape::EllipsoidPointWithAltitudeAndUncertaintyEllipsoid {
                uncertainty_altitude,
                ..
            } => Some(*uncertainty_altitude),
            _ => None,
        }
    }

    pub fn confidence(&self) -> Option<u8> {
        match self {
            GeographicShape::EllipsoidPointWithUncertaintyEllipse { confidence, .. }
            | GeographicShape::EllipsoidPointWithAltitudeAndUncertaintyEllipsoid {
                confidence,
                ..
            } => Some(*confidence),
            GeographicShape::EllipsoidArc(arc) => Some(arc.confidence),
            _ => None,
        }
    }

    pub fn arc(&self) -> Option<&EllipsoidArc> {
        match self {
            GeographicShape::EllipsoidArc(arc) => Some(arc),
            _ => None,
        }
    }

    pub fn polygon(&self) -> Option<&Polygon> {
        match self {
            GeographicShape::Polygon(polygon) => Some(polygon),
            _ => None,
        }
    }

    /// Largest horizontal uncertainty the shape expresses, in meters.
    ///
    /// `None` for shapes without horizontal uncertainty.
    pub fn horizontal_uncertainty(&self) -> Option<f64> {
        match self {
            GeographicShape::EllipsoidPointWithUncertaintyCircle { uncertainty, .. } => {
                Some(*uncertainty)
            },
            GeographicShape::EllipsoidPointWithUncertaintyEllipse { ellipse, .. }
            | GeographicShape::EllipsoidPointWithAltitudeAndUncertaintyEllipsoid {
                ellipse, ..
            } => Some(ellipse.semi_major.max(ellipse.semi_minor)),
            GeographicShape::EllipsoidArc(arc) => Some(arc.uncertainty_radius),
            _ => None,
        }
    }

    /// Every coordinate the shape carries.
    pub fn coordinates(&self) -> Vec<Coordinates> {
        match self {
            GeographicShape::Polygon(polygon) => polygon.points.clone(),
            shape => shape.position().into_iter().collect(),
        }
    }
}

impl fmt::Display for GeographicShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields = Fields::new(f, self.type_of_shape().name())?;
        match self {
            GeographicShape::EllipsoidPoint { position } => position.write_to(&mut fields)?,
            GeographicShape::EllipsoidPointWithUncertaintyCircle {
                position,
                uncertainty,
            } => {
                position.write_to(&mut fields)?;
                fields.field("uncertainty", uncertainty)?;
            },
            GeographicShape::EllipsoidPointWithUncertaintyEllipse {
                position,
                ellipse,
                confidence,
            } => {
                position.write_to(&mut fields)?;
                ellipse.write_to(&mut fields)?;
                fields.field("confidence", confidence)?;
            },
            GeographicShape::Polygon(polygon) => {
                fields.field("numberOfPoints", &polygon.len())?;
                for point in &polygon.points {
                    fields.field("point", point)?;
                }
            },
            GeographicShape::EllipsoidPointWithAltitude { position, altitude } => {
                position.write_to(&mut fields)?;
                fields.field("altitude", altitude)?;
            },
            GeographicShape::EllipsoidPointWithAltitudeAndUncertaintyEllipsoid {
                position,
                altitude,
                ellipse,
                uncertainty_altitude,
                confidence,
            } => {
                position.write_to(&mut fields)?;
                fields.field("altitude", altitude)?;
                ellipse.write_to(&mut fields)?;
                fields.field("uncertaintyAltitude", uncertainty_altitude)?;
                fields.field("confidence", confidence)?;
            },
            GeographicShape::EllipsoidArc(arc) => {
                arc.center.write_to(&mut fields)?;
                fields.field("innerRadius", &arc.inner_radius)?;
                fields.field("uncertaintyRadius", &arc.uncertainty_radius)?;
                fields.field("offsetAngle", &arc.offset_angle)?;
                fields.field("includedAngle", &arc.included_angle)?;
                fields.field("confidence", &arc.confidence)?;
            },
        }
        fields.finish()
    }
}

/// Largest 7-bit uncertainty code
pub const MAX_UNCERTAINTY_CODE: u8 = 0x7f;

/// Meters for a 7-bit horizontal uncertainty code: `10 * (1.1^k - 1)`.
///
/// `None` for codes above [`MAX_UNCERTAINTY_CODE`].
pub fn horizontal_uncertainty_meters(code: u8) -> Option<f64> {
    (code <= MAX_UNCERTAINTY_CODE).then(|| 10.0 * (1.1_f64.powi(i32::from(code)) - 1.0))
}

/// Smallest horizontal uncertainty code whose radius covers `meters`.
pub fn horizontal_uncertainty_code(meters: f64) -> u8 {
    (0..=MAX_UNCERTAINTY_CODE)
        .find(|code| horizontal_uncertainty_meters(*code).is_some_and(|m| m >= meters))
        .unwrap_or(MAX_UNCERTAINTY_CODE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_codes_follow_gad() {
        let codes: Vec<u8> = TypeOfShape::ALL.iter().map(|s| s.code()).collect();
        assert_eq!(codes, vec![0, 1, 3, 5, 8, 9, 10]);
        assert_eq!(TypeOfShape::try_from(5), Ok(TypeOfShape::Polygon));
        assert!(TypeOfShape::try_from(2).is_err());
    }

    #[test]
    fn shape_names_match_display() {
        for shape in TypeOfShape::ALL {
            assert_eq!(shape.name(), shape.to_string());
        }
        assert_eq!(TypeOfShape::EllipsoidArc.name(), "ellipsoidArc");
    }

    #[test]
    fn every_shape_has_its_own_capability_bit() {
        let all: SupportedShapes = TypeOfShape::ALL.into_iter().collect();
        assert_eq!(all, SupportedShapes::all());
    }

    #[test]
    fn uncertainty_codes() {
        assert_eq!(horizontal_uncertainty_meters(0), Some(0.0));
        assert!((horizontal_uncertainty_meters(1).unwrap() - 1.0).abs() < 1e-9);
        assert_eq!(horizontal_uncertainty_code(0.0), 0);
        let code = horizontal_uncertainty_code(100.0);
        assert!(horizontal_uncertainty_meters(code).unwrap() >= 100.0);
        assert!(horizontal_uncertainty_meters(code - 1).unwrap() < 100.0);
        assert_eq!(horizontal_uncertainty_code(1e9), 0x7f);
    }

    #[test]
    fn codes_above_seven_bits_have_no_meters() {
        assert!(horizontal_uncertainty_meters(0x7f).is_some());
        assert_eq!(horizontal_uncertainty_meters(0x80), None);
        assert_eq!(horizontal_uncertainty_meters(0x85), None);
        assert_eq!(horizontal_uncertainty_meters(0xff), None);
    }

    #[test]
    fn polygon_renders_every_point() {
        let shape = GeographicShape::Polygon(Polygon::new(vec![
            Coordinates::new(1.0, 2.0),
            Coordinates::new(3.0, 4.0),
            Coordinates::new(5.0, 6.0),
        ]));
        assert_eq!(
            shape.to_string(),
            "polygon [numberOfPoints=3, point=(1, 2), point=(3, 4), point=(5, 6)]"
        );
    }
}
