use serde::Serialize;

/// Integer-coded provider enum. Unknown codes are rejected rather than
/// mapped to a fallback variant.
macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident = $code:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum $name {
            $($(#[$vmeta])* $variant = $code),+
        }

        impl $name {
            pub(crate) const KIND: &'static str = stringify!($name);

            /// Wire code of this variant.
            pub const fn code(self) -> i64 {
                self as i64
            }

            pub fn from_code(code: i64) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

coded_enum! {
    #[derive(Default)]
    OrderType { #[default] Delivery = 0, Takeaway = 1 }
}

coded_enum! {
    #[derive(Default)]
    PaymentMethod { #[default] OnDelivery = 0, Online = 1 }
}

coded_enum! {
    #[derive(Default)]
    PaymentType { #[default] Cash = 0, Card = 1 }
}

coded_enum! {
    /// Which side cancelled an order.
    #[derive(Default)]
    CancellationType { #[default] Restaurant = 0, Client = 1 }
}

coded_enum! {
    /// Lifecycle state of an order as reported by the provider.
    OrderStatus { New = 0, Accepted = 1, Cancelled = 2, Sent = 3, Delivered = 4 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for status in [
            OrderStatus::New,
            OrderStatus::Accepted,
            OrderStatus::Cancelled,
            OrderStatus::Sent,
            OrderStatus::Delivered,
        ] {
            assert_eq!(OrderStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(PaymentMethod::Online.code(), 1);
        assert_eq!(PaymentType::Card.code(), 1);
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert_eq!(OrderStatus::from_code(5), None);
        assert_eq!(OrderStatus::from_code(-1), None);
        assert_eq!(OrderType::from_code(2), None);
        assert_eq!(CancellationType::from_code(99), None);
    }

    #[test]
    fn defaults_match_provider_defaults() {
        assert_eq!(OrderType::default(), OrderType::Delivery);
        assert_eq!(PaymentMethod::default(), PaymentMethod::OnDelivery);
        assert_eq!(PaymentType::default(), PaymentType::Cash);
        assert_eq!(CancellationType::default(), CancellationType::Restaurant);
    }

    #[test]
    fn serializes_as_screaming_names() {
        assert_eq!(serde_json::to_value(PaymentMethod::OnDelivery).unwrap(), "ON_DELIVERY");
        assert_eq!(serde_json::to_value(OrderStatus::Cancelled).unwrap(), "CANCELLED");
    }
}
