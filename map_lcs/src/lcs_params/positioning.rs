use core::fmt;

use super::{fmt_list, horizontal_uncertainty_meters, Fields, GeographicShape, LcsQos};

protocol_enum! {
    /// How the result of a positioning method was used (TS 49.031)
    pub enum PositioningUsage {
        AttemptedUnsuccessfully = 0 => "attemptedUnsuccessfulDueToFailureOrInterruption",
        ResultsNotUsed = 1 => "attemptedSuccessfulResultsNotUsedToGenerateLocation",
        ResultsUsedToVerify = 2 => "attemptedSuccessfulResultsUsedToVerifyButNotGenerateLocation",
        ResultsUsedToGenerate = 3 => "attemptedSuccessfulResultsUsedToGenerateLocation",
        /// The MS supports several mobile based methods and the one used cannot be told
        MethodUndetermined = 4 => "attemptedSuccessfulCaseWhereMsSupportsMultipleMobileBasedMethods",
    }
}

protocol_enum! {
    /// GERAN positioning method (TS 49.031)
    pub enum GeranPositioningMethod {
        TimingAdvance = 0 => "timingAdvance",
        MobileAssistedEotd = 3 => "mobileAssistedE-OTD",
        MobileBasedEotd = 4 => "mobileBasedE-OTD",
        MobileAssistedGps = 5 => "mobileAssistedGPS",
        MobileBasedGps = 6 => "mobileBasedGPS",
        ConventionalGps = 7 => "conventionalGPS",
        UTdoa = 8 => "u-TDOA",
        CellId = 12 => "cellID",
    }
}

protocol_enum! {
    /// UTRAN positioning method (TS 25.413)
    pub enum UtranPositioningMethod {
        MobileAssistedGps = 5 => "mobileAssistedGPS",
        MobileBasedGps = 6 => "mobileBasedGPS",
        ConventionalGps = 7 => "conventionalGPS",
        UTdoa = 8 => "u-TDOA",
        Otdoa = 9 => "oTDOA",
        Ipdl = 10 => "iPDL",
        Rtt = 11 => "rTT",
        CellId = 12 => "cellID",
    }
}

/// A positioning method together with how its result was used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositioningMethodUsage<M> {
    pub method: M,
    pub usage: PositioningUsage,
}

impl<M: fmt::Display> fmt::Display for PositioningMethodUsage<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.method, self.usage)
    }
}

/// `PositioningDataInformation` / `UtranPositioningDataInfo`: the methods attempted for one
/// location estimate, in reported order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositioningData<M> {
    pub entries: Vec<PositioningMethodUsage<M>>,
}

pub type GeranPositioningData = PositioningData<GeranPositioningMethod>;
pub type UtranPositioningData = PositioningData<UtranPositioningMethod>;

impl<M: Copy> PositioningData<M> {
    pub fn new(entries: Vec<PositioningMethodUsage<M>>) -> Self {
        Self { entries }
    }

    /// Methods whose results produced the location estimate.
    pub fn methods_used_for_location(&self) -> impl Iterator<Item = M> + '_ {
        self.entries
            .iter()
            .filter(|entry| entry.usage == PositioningUsage::ResultsUsedToGenerate)
            .map(|entry| entry.method)
    }
}

impl<M: Copy> FromIterator<(M, PositioningUsage)> for PositioningData<M> {
    fn from_iter<I: IntoIterator<Item = (M, PositioningUsage)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(method, usage)| PositioningMethodUsage { method, usage })
                .collect(),
        )
    }
}

impl<M: fmt::Display> fmt::Display for PositioningData<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_list(&self.entries, f)
    }
}

protocol_enum! {
    /// GANSS identity (TS 49.031)
    pub enum GanssId {
        Galileo = 0 => "galileo",
        Sbas = 1 => "sbas",
        ModernizedGps = 2 => "modernizedGPS",
        Qzss = 3 => "qzss",
        Glonass = 4 => "glonass",
        Bds = 5 => "bds",
    }
}

protocol_enum! {
    pub enum GanssMethod {
        MsBased = 0 => "msBased",
        MsAssisted = 1 => "msAssisted",
        Conventional = 2 => "conventional",
    }
}

/// One GANSS method entry. An absent `ganss_id` means Galileo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GanssMethodUsage {
    pub method: GanssMethod,
    pub ganss_id: Option<GanssId>,
    pub usage: PositioningUsage,
}

impl GanssMethodUsage {
    pub fn ganss_id(&self) -> GanssId {
        self.ganss_id.unwrap_or(GanssId::Galileo)
    }
}

impl fmt::Display for GanssMethodUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{}", self.method, self.ganss_id(), self.usage)
    }
}

/// `GANSSPositioningDataSet`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GanssPositioningData {
    pub entries: Vec<GanssMethodUsage>,
}

impl fmt::Display for GanssPositioningData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_list(&self.entries, f)
    }
}

protocol_enum! {
    pub enum VerticalDirection {
        Upward = 0 => "upward",
        Downward = 1 => "downward",
    }
}

/// `VelocityEstimate` (TS 23.032 clause 8).
///
/// Bearing is in degrees clockwise from north, horizontal speeds in km/h, vertical speeds and
/// speed uncertainties in km/h as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VelocityEstimate {
    HorizontalVelocity {
        bearing: u16,
        horizontal_speed: u16,
    },
    HorizontalWithVerticalVelocity {
        bearing: u16,
        horizontal_speed: u16,
        vertical_direction: VerticalDirection,
        vertical_speed: u8,
    },
    HorizontalVelocityWithUncertainty {
        bearing: u16,
        horizontal_speed: u16,
        uncertainty_speed: u8,
    },
    HorizontalWithVerticalVelocityAndUncertainty {
        bearing: u16,
        horizontal_speed: u16,
        vertical_direction: VerticalDirection,
        vertical_speed: u8,
        horizontal_uncertainty_speed: u8,
        vertical_uncertainty_speed: u8,
    },
}

impl VelocityEstimate {
    /// Velocity type code
    pub fn velocity_type(&self) -> u8 {
        match self {
            VelocityEstimate::HorizontalVelocity { .. } => 0,
            VelocityEstimate::HorizontalWithVerticalVelocity { .. } => 1,
            VelocityEstimate::HorizontalVelocityWithUncertainty { .. } => 2,
            VelocityEstimate::HorizontalWithVerticalVelocityAndUncertainty { .. } => 3,
        }
    }

    pub fn bearing(&self) -> u16 {
        match *self {
            VelocityEstimate::HorizontalVelocity { bearing, .. }
            | VelocityEstimate::HorizontalWithVerticalVelocity { bearing, .. }
            | VelocityEstimate::HorizontalVelocityWithUncertainty { bearing, .. }
            | VelocityEstimate::HorizontalWithVerticalVelocityAndUncertainty { bearing, .. } => {
                bearing
            },
        }
    }

    pub fn horizontal_speed(&self) -> u16 {
        match *self {
            VelocityEstimate::HorizontalVelocity {
                horizontal_speed, ..
            }
            | VelocityEstimate::HorizontalWithVerticalVelocity {
                horizontal_speed, ..
            }
            | VelocityEstimate::HorizontalVelocityWithUncertainty {
                horizontal_speed, ..
            }
            | VelocityEstimate::HorizontalWithVerticalVelocityAndUncertainty {
                horizontal_speed,
                ..
            } => horizontal_speed,
        }
    }

    /// Signed vertical speed, positive upward
    pub fn vertical_speed(&self) -> Option<i16> {
        match *self {
            VelocityEstimate::HorizontalWithVerticalVelocity {
                vertical_direction,
                vertical_speed,
                ..
            }
            | VelocityEstimate::HorizontalWithVerticalVelocityAndUncertainty {
                vertical_direction,
                vertical_speed,
                ..
            } => Some(match vertical_direction {
                VerticalDirection::Upward => i16::from(vertical_speed),
                VerticalDirection::Downward => -i16::from(vertical_speed),
            }),
            _ => None,
        }
    }
}

impl fmt::Display for VelocityEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields = Fields::new(f, "VelocityEstimate")?;
        fields.field("velocityType", &self.velocity_type())?;
        fields.field("bearing", &self.bearing())?;
        fields.field("horizontalSpeed", &self.horizontal_speed())?;
        fields.opt("verticalSpeed", self.vertical_speed().as_ref())?;
        match self {
            VelocityEstimate::HorizontalVelocityWithUncertainty {
                uncertainty_speed, ..
            } => fields.field("uncertaintySpeed", uncertainty_speed)?,
            VelocityEstimate::HorizontalWithVerticalVelocityAndUncertainty {
                horizontal_uncertainty_speed,
                vertical_uncertainty_speed,
                ..
            } => {
                fields.field("horizontalUncertaintySpeed", horizontal_uncertainty_speed)?;
                fields.field("verticalUncertaintySpeed", vertical_uncertainty_speed)?;
            },
            _ => {},
        }
        fields.finish()
    }
}

protocol_enum! {
    /// `AccuracyFulfilmentIndicator`
    pub enum AccuracyFulfilmentIndicator {
        RequestedAccuracyFulfilled = 0 => "requestedAccuracyFulfilled",
        RequestedAccuracyNotFulfilled = 1 => "requestedAccuracyNotFulfilled",
    }
}

impl AccuracyFulfilmentIndicator {
    /// Compares an estimate against the requested horizontal accuracy.
    ///
    /// `None` when no horizontal accuracy was requested, or when the requested code is not a
    /// 7-bit uncertainty code. Shapes without horizontal uncertainty (points, polygons, points
    /// with altitude) never fulfil a request.
    pub fn evaluate(qos: &LcsQos, estimate: &GeographicShape) -> Option<Self> {
        let requested = horizontal_uncertainty_meters(qos.horizontal_accuracy?)?;
        let fulfilled = estimate
            .horizontal_uncertainty()
            .is_some_and(|uncertainty| uncertainty <= requested);
        Some(if fulfilled {
            AccuracyFulfilmentIndicator::RequestedAccuracyFulfilled
        } else {
            AccuracyFulfilmentIndicator::RequestedAccuracyNotFulfilled
        })
    }
}
