use proptest::prelude::*;

use moove_types::{Address, EthAmount, Timestamp, SECONDS_PER_DAY};

proptest! {
    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// Timestamp elapsed_since: elapsed_since(now) = now - self.
    #[test]
    fn timestamp_elapsed_since(base in 0u64..1_000_000, offset in 0u64..1_000_000) {
        let t = Timestamp::new(base);
        let now = Timestamp::new(base + offset);
        prop_assert_eq!(t.elapsed_since(now), offset);
    }

    /// plus_days never moves a timestamp backwards, even near u64::MAX.
    #[test]
    fn timestamp_plus_days_monotonic(base in 0u64..u64::MAX, days in 0u64..10_000) {
        let t = Timestamp::new(base);
        prop_assert!(t.plus_days(days) >= t);
        if let Some(expected) = days.checked_mul(SECONDS_PER_DAY).and_then(|s| base.checked_add(s)) {
            prop_assert_eq!(t.plus_days(days).as_secs(), expected);
        }
    }

    /// EthAmount checked_add/checked_sub agree with u128 arithmetic.
    #[test]
    fn eth_amount_checked_ops(a in 0u128..u128::MAX / 2, b in 0u128..u128::MAX / 2) {
        let x = EthAmount::from_wei(a);
        let y = EthAmount::from_wei(b);
        prop_assert_eq!(x.checked_add(y).map(|v| v.wei()), Some(a + b));
        prop_assert_eq!(x.checked_sub(y).map(|v| v.wei()), a.checked_sub(b));
    }

    /// Any non-blank string parses to an address that round-trips its text.
    #[test]
    fn address_parse_roundtrip(s in "0x[0-9a-f]{1,40}") {
        let addr = Address::parse(s.clone()).unwrap();
        prop_assert_eq!(addr.as_str(), s.as_str());
        prop_assert!(addr.has_prefix());
    }
}
