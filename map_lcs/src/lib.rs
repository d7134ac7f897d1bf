//! # map_lcs
//!
//! In-memory model of the parameters exchanged in SS7 MAP Location Services transactions
//! (`provideSubscriberLocation`, `subscriberLocationReport`) between a GMLC and the HLR, VLR,
//! MSC, SGSN or MME, following 3GPP TS 29.002, TS 23.032 and TS 49.031.
//!
//! Encoding these parameters onto MAP PDUs and carrying them over SS7 is left to the protocol
//! stack; this crate is the value that stack fills in and reads out.
//!
//! Populating Parameters
//! =====================
//!
//! [`LcsParams`] starts empty and every parameter is set through its setter. Setters never fail;
//! absence is its own value and is distinct from zero or `false`:
//! ```
//! use map_lcs::{Imsi, LcsParams, LcsQos};
//!
//! let mut params = LcsParams::new();
//! params.set_imsi(Imsi::new("123450000000001"));
//! params.set_lcs_qos(LcsQos {
//!     horizontal_accuracy: Some(10),
//!     ..Default::default()
//! });
//!
//! assert_eq!(params.imsi().map(Imsi::as_str), Some("123450000000001"));
//! assert_eq!(params.msisdn(), None);
//! assert_eq!(
//!     params.describe(),
//!     "LcsParams [imsi=123450000000001, lcsQos=LcsQos [horizontalAccuracy=10]]"
//! );
//! ```
//!
//! Location Estimates
//! ==================
//!
//! A location estimate is a single [`GeographicShape`] variant. Replacing it replaces every
//! attribute at once, so nothing of a previous shape stays observable:
//! ```
//! use map_lcs::{GeographicShape, LcsParams, TypeOfShape};
//!
//! let mut params = LcsParams::new();
//! params.set_geographic_shape(GeographicShape::circle(48.85, 2.35, 120.0));
//! params.set_geographic_shape(GeographicShape::point(48.85, 2.35));
//!
//! let shape = params.geographic_shape().unwrap();
//! assert_eq!(shape.type_of_shape(), TypeOfShape::EllipsoidPoint);
//! assert_eq!(shape.uncertainty(), None);
//! ```
//!
//! Validating at the Boundary
//! ==========================
//!
//! Conditional-mandatory rules are checked by a [`Validator`] before an aggregate is encoded, or
//! after one is decoded:
//! ```
//! use map_lcs::{
//!     DeferredLocationEventType, Imsi, LcsClientId, LcsClientType, LcsOperation, LcsParams,
//!     LocationType, ValidationRule, Validator,
//! };
//!
//! let mut params = LcsParams::new();
//! params.set_imsi(Imsi::new("123450000000001"));
//! params.set_lcs_client_id(LcsClientId::new(LcsClientType::ValueAddedServices));
//! params.set_location_type(LocationType::deferred(DeferredLocationEventType::MS_AVAILABLE));
//!
//! let err = Validator::default()
//!     .validate(&params, LcsOperation::ProvideSubscriberLocation)
//!     .unwrap_err();
//! assert_eq!(err.rule(), ValidationRule::MissingLcsReferenceNumber);
//! assert!(err.to_string().starts_with("MISSING_LCS_REFERENCE_NUMBER"));
//! ```

#[cfg(feature = "serde")]
extern crate serde;

pub use crate::{
    error::{ProtocolValidationError, ValidationRule},
    lcs_params::*,
    validation::{LcsOperation, SequenceTracker, ValidationPolicy, Validator},
};

mod error;
mod lcs_params;
mod validation;
