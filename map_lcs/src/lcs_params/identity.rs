use bitflags::bitflags;
use core::fmt;
use std::net::IpAddr;

use super::{fmt_flags, fmt_hex, Fields};

protocol_enum! {
    /// Nature of address indicator of an `AddressString`
    pub enum NatureOfAddress {
        Unknown = 0 => "unknown",
        International = 1 => "international",
        National = 2 => "national",
        NetworkSpecific = 3 => "networkSpecific",
        SubscriberNumber = 4 => "subscriberNumber",
        Abbreviated = 6 => "abbreviated",
    }
}

protocol_enum! {
    /// Numbering plan indicator of an `AddressString`
    pub enum NumberingPlan {
        Unknown = 0 => "unknown",
        /// ITU-T E.164
        Isdn = 1 => "isdn",
        /// ITU-T X.121
        Data = 3 => "data",
        /// ITU-T F.69
        Telex = 4 => "telex",
        /// ITU-T E.212
        LandMobile = 6 => "landMobile",
        National = 8 => "national",
        Private = 9 => "private",
    }
}

/// `ISDN-AddressString`: an E.164 number with its address indicators.
///
/// Digits are kept as given; no format check is made here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IsdnAddress {
    pub nature_of_address: NatureOfAddress,
    pub numbering_plan: NumberingPlan,
    pub digits: String,
}

impl IsdnAddress {
    pub fn new(
        nature_of_address: NatureOfAddress,
        numbering_plan: NumberingPlan,
        digits: impl Into<String>,
    ) -> Self {
        Self {
            nature_of_address,
            numbering_plan,
            digits: digits.into(),
        }
    }

    /// International E.164 number, the common case for node and subscriber numbers.
    pub fn international(digits: impl Into<String>) -> Self {
        Self::new(NatureOfAddress::International, NumberingPlan::Isdn, digits)
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }
}

impl fmt::Display for IsdnAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}/{})",
            self.digits, self.nature_of_address, self.numbering_plan
        )
    }
}

macro_rules! digit_identity {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

digit_identity! {
    /// International Mobile Subscriber Identity, as a digit string
    Imsi
}

digit_identity! {
    /// International Mobile Equipment Identity, as a digit string
    Imei
}

digit_identity! {
    /// Diameter identity (FQDN) of an MME, SGSN or 3GPP AAA server
    DiameterIdentity
}

/// Local Mobile Station Identity: four opaque octets allocated by the VLR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lmsi(pub [u8; 4]);

impl fmt::Display for Lmsi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_hex(&self.0, f)
    }
}

/// `GSN-Address` of a GMLC or privacy profile register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GsnAddress(pub IpAddr);

impl fmt::Display for GsnAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// `Additional-Number` CHOICE
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AdditionalNumber {
    MscNumber(IsdnAddress),
    SgsnNumber(IsdnAddress),
}

impl AdditionalNumber {
    pub fn number(&self) -> &IsdnAddress {
        match self {
            AdditionalNumber::MscNumber(number) | AdditionalNumber::SgsnNumber(number) => number,
        }
    }

    pub fn is_sgsn(&self) -> bool {
        matches!(self, AdditionalNumber::SgsnNumber(_))
    }
}

impl fmt::Display for AdditionalNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdditionalNumber::MscNumber(number) => write!(f, "msc-Number {}", number),
            AdditionalNumber::SgsnNumber(number) => write!(f, "sgsn-Number {}", number),
        }
    }
}

/// Public Land Mobile Network identifier.
///
/// `long_mnc` tells whether the MNC is written with 3 digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plmn {
    /// Mobile Country Code (3 digits)
    pub mcc: u16,
    /// Mobile Network Code (2 or 3 digits)
    pub mnc: u16,
    pub long_mnc: bool,
}

impl Plmn {
    pub const fn new(mcc: u16, mnc: u16, long_mnc: bool) -> Self {
        Self { mcc, mnc, long_mnc }
    }
}

impl fmt::Display for Plmn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.long_mnc {
            write!(f, "{:03}-{:03}", self.mcc, self.mnc)
        } else {
            write!(f, "{:03}-{:02}", self.mcc, self.mnc)
        }
    }
}

bitflags! {
    /// `SupportedLCS-CapabilitySets` of the serving node
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct LcsCapabilitySets: u8 {
        /// Release 98/99 capability
        const LCS_CAPA_SET1 = 0x01;
        /// Release 4 capability
        const LCS_CAPA_SET2 = 0x02;
        /// Release 5 capability
        const LCS_CAPA_SET3 = 0x04;
        /// Release 6 capability
        const LCS_CAPA_SET4 = 0x08;
        /// Release 7 capability
        const LCS_CAPA_SET5 = 0x10;
    }
}

impl fmt::Display for LcsCapabilitySets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_flags(self, f)
    }
}

/// Cell Global Identity of the serving cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellGlobalId {
    pub plmn: Plmn,
    /// Location Area Code
    pub lac: u16,
    pub cell_id: u16,
}

impl fmt::Display for CellGlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields = Fields::new(f, "CellGlobalId")?;
        fields.field("plmn", &self.plmn)?;
        fields.field("lac", &self.lac)?;
        fields.field("cellId", &self.cell_id)?;
        fields.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plmn_renders_mnc_length() {
        assert_eq!(Plmn::new(1, 1, false).to_string(), "001-01");
        assert_eq!(Plmn::new(310, 410, true).to_string(), "310-410");
    }

    #[test]
    fn lmsi_renders_hex() {
        assert_eq!(Lmsi([0xde, 0xad, 0x00, 0x01]).to_string(), "dead0001");
    }
}
