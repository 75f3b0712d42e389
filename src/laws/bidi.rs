//! Bidirectional converter laws.

use proptest::prelude::*;

use super::common::{decimal, flip, shift};
use crate::bidi::BiConverter;

proptest! {
    #[test]
    fn round_trip(a in any::<i64>(), n in any::<i64>()) {
        let c = shift(n);
        prop_assert_eq!(c.convert_back(c.convert(a).unwrap()).unwrap(), a);

        let text = decimal();
        prop_assert_eq!(text.convert_back(text.convert(a).unwrap()).unwrap(), a);
    }

    #[test]
    fn reverse_swaps_directions(a in any::<i64>(), n in any::<i64>()) {
        let c = shift(n);
        let r = c.reverse();
        prop_assert_eq!(r.convert(a).unwrap(), c.convert_back(a).unwrap());
        prop_assert_eq!(r.convert_back(a).unwrap(), c.convert(a).unwrap());
        prop_assert!(r.reverse().same_as(&c));
    }

    #[test]
    fn composition(a in any::<i64>(), n in any::<i64>()) {
        let f = shift(n);
        let g = decimal();
        let fg = f.and_then(&g);

        let out = fg.convert(a).unwrap();
        prop_assert_eq!(&out, &g.convert(f.convert(a).unwrap()).unwrap());
        prop_assert_eq!(fg.convert_back(out).unwrap(), a);
    }

    #[test]
    fn associativity(a in any::<i64>(), n in any::<i64>()) {
        let (f, g, h) = (shift(n), flip(), decimal());
        let left = f.and_then(&g).and_then(&h);
        let right = f.and_then(&g.and_then(&h));

        let out = left.convert(a).unwrap();
        prop_assert_eq!(&out, &right.convert(a).unwrap());
        prop_assert_eq!(left.convert_back(out.clone()).unwrap(), right.convert_back(out).unwrap());
    }

    #[test]
    fn identity_is_neutral(a in any::<i64>(), n in any::<i64>()) {
        let x = shift(n);
        let id = BiConverter::<i64, i64>::identity();

        prop_assert_eq!(id.and_then(&x).convert(a).unwrap(), x.convert(a).unwrap());
        prop_assert_eq!(x.and_then(&id).convert_back(a).unwrap(), x.convert_back(a).unwrap());
    }

    #[test]
    fn convert_all_matches_convert(items in prop::collection::vec(any::<i64>(), 0..32), n in any::<i64>()) {
        let c = shift(n);
        let lazy: Vec<i64> = c.convert_all(items.clone()).collect::<Result<_, _>>().unwrap();
        let eager: Vec<i64> = items.into_iter().map(|a| c.convert(a).unwrap()).collect();
        prop_assert_eq!(lazy, eager);
    }
}

#[test]
fn identity_is_elided_by_reference() {
    let x = decimal();
    let left = BiConverter::<i64, i64>::identity().and_then(&x);
    let right = x.and_then(&BiConverter::<String, String>::identity());
    assert!(left.same_as(&x));
    assert!(right.same_as(&x));
}
