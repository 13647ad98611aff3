//! Property-based tests for the rectangle algebra

use proptest::prelude::*;
use rtree2d::geometry::Rectangle;

prop_compose! {
    fn arb_rectangle()(x in 0u32..500, y in 0u32..500, w in 0u32..200, h in 0u32..200) -> Rectangle {
        Rectangle::from_edges(x, y, x + w, y + h)
    }
}

proptest! {
    #[test]
    fn test_area_is_width_times_height(r in arb_rectangle()) {
        prop_assert_eq!(r.area(), r.width() as u64 * r.height() as u64);
        prop_assert_eq!(r.perimeter(), 2 * (r.width() as u64 + r.height() as u64));
    }

    #[test]
    fn test_mbr_is_commutative(a in arb_rectangle(), b in arb_rectangle()) {
        prop_assert_eq!(a.mbr(&b), b.mbr(&a));
    }

    #[test]
    fn test_mbr_contains_both_inputs(a in arb_rectangle(), b in arb_rectangle()) {
        let m = a.mbr(&b);
        prop_assert!(a.is_subset(&m));
        prop_assert!(b.is_subset(&m));
    }

    #[test]
    fn test_mbr_of_contained_rectangle_is_identity(a in arb_rectangle(), b in arb_rectangle()) {
        let m = a.mbr(&b);
        prop_assert_eq!(m.mbr(&a), m);
        prop_assert_eq!(a.mbr(&a), a);
    }

    #[test]
    fn test_overlap_is_negation_of_separation(a in arb_rectangle(), b in arb_rectangle()) {
        prop_assert_eq!(a.overlaps(&b), !a.is_separate(&b));
        prop_assert_eq!(a.is_separate(&b), b.is_separate(&a));
    }

    #[test]
    fn test_enlargement_definition(i in arb_rectangle(), a in arb_rectangle()) {
        prop_assert_eq!(i.enlargement(&a), i.mbr(&a).area() - a.area());
    }

    #[test]
    fn test_waste_definition(a in arb_rectangle(), b in arb_rectangle()) {
        let expected = a.mbr(&b).area() as i64 - a.area() as i64 - b.area() as i64;
        prop_assert_eq!(a.waste(&b), expected);
        prop_assert_eq!(a.waste(&b), b.waste(&a));
    }

    #[test]
    fn test_overlap_area_bounds(a in arb_rectangle(), b in arb_rectangle()) {
        let overlap = a.overlap_area(&b);
        prop_assert_eq!(overlap, b.overlap_area(&a));
        prop_assert!(overlap <= a.area().min(b.area()));
        if a.is_separate(&b) {
            prop_assert_eq!(overlap, 0);
        }
    }

    #[test]
    fn test_grow_matches_mbr(a in arb_rectangle(), b in arb_rectangle()) {
        let mut grown = a;
        grown.grow(&b);
        prop_assert_eq!(grown, a.mbr(&b));
    }
}
