use bigdecimal::BigDecimal;

/// Delivery options and their flat fees. Labels the resolver does not know
/// are rejected outright rather than priced at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOption {
    Island,
    Mainland,
    InterStatePark,
    InterStateDoorstep,
    PickUp,
}

impl DeliveryOption {
    pub const ALL: [DeliveryOption; 5] = [
        DeliveryOption::Island,
        DeliveryOption::Mainland,
        DeliveryOption::InterStatePark,
        DeliveryOption::InterStateDoorstep,
        DeliveryOption::PickUp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryOption::Island => "Island",
            DeliveryOption::Mainland => "Mainland",
            DeliveryOption::InterStatePark => "Inter-state (park)",
            DeliveryOption::InterStateDoorstep => "Inter-state (doorstep)",
            DeliveryOption::PickUp => "Pick-up",
        }
    }

    pub fn fee(&self) -> i64 {
        match self {
            DeliveryOption::Island => 2000,
            DeliveryOption::Mainland => 1500,
            DeliveryOption::InterStatePark => 3000,
            DeliveryOption::InterStateDoorstep => 5000,
            DeliveryOption::PickUp => 0,
        }
    }

    pub fn fee_amount(&self) -> BigDecimal {
        BigDecimal::from(self.fee())
    }
}

impl std::str::FromStr for DeliveryOption {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Island" => Ok(DeliveryOption::Island),
            "Mainland" => Ok(DeliveryOption::Mainland),
            "Inter-state (park)" => Ok(DeliveryOption::InterStatePark),
            "Inter-state (doorstep)" => Ok(DeliveryOption::InterStateDoorstep),
            "Pick-up" => Ok(DeliveryOption::PickUp),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn fee_table_matches_the_published_rates() {
        assert_eq!(DeliveryOption::Island.fee(), 2000);
        assert_eq!(DeliveryOption::Mainland.fee(), 1500);
        assert_eq!(DeliveryOption::InterStatePark.fee(), 3000);
        assert_eq!(DeliveryOption::InterStateDoorstep.fee(), 5000);
        assert_eq!(DeliveryOption::PickUp.fee(), 0);
    }

    #[test]
    fn labels_round_trip() {
        for option in DeliveryOption::ALL {
            assert_eq!(DeliveryOption::from_str(option.as_str()), Ok(option));
        }
    }

    #[test]
    fn unknown_labels_are_rejected_not_free() {
        assert_eq!(DeliveryOption::from_str("Moon"), Err(()));
        assert_eq!(DeliveryOption::from_str(""), Err(()));
        // Labels are exact; close misses do not resolve.
        assert_eq!(DeliveryOption::from_str("island"), Err(()));
        assert_eq!(DeliveryOption::from_str("Inter-state(park)"), Err(()));
    }
}
