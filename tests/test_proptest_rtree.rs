//! Property-based tests for RTree

use shared::*;

use proptest::prelude::*;
use rtree2d::geometry::Rectangle;
use rtree2d::rtree::RTree;

prop_compose! {
    fn arb_rectangle()(x in 0u32..500, y in 0u32..500, w in 0u32..100, h in 0u32..100) -> Rectangle {
        Rectangle::from_edges(x, y, x + w, y + h)
    }
}

fn items_from_rects(rects: &[Rectangle]) -> Vec<Item> {
    rects
        .iter()
        .enumerate()
        .map(|(idx, bbox)| Item {
            id: idx as u32,
            bbox: *bbox,
        })
        .collect()
}

proptest! {
    #[test]
    fn test_search_matches_naive_filter(
        rects in prop::collection::vec(arb_rectangle(), 1..50),
        window in arb_rectangle()
    ) {
        let items = items_from_rects(&rects);
        let mut tree: RTree<Item> = RTree::new();
        for item in &items {
            tree.insert(item.clone());
        }
        tree.check();

        let found = ids_of(tree.search(&window));
        let expected = ids_of(items.iter().filter(|item| item.bbox.overlaps(&window)));
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn test_every_item_is_reachable_by_its_own_bbox(
        rects in prop::collection::vec(arb_rectangle(), 1..40)
    ) {
        let items = items_from_rects(&rects);
        let mut tree: RTree<Item> = RTree::new();
        for item in &items {
            tree.insert(item.clone());
        }

        for item in &items {
            // Degenerate rectangles have no interior and legitimately never overlap.
            if item.bbox.area() == 0 {
                continue;
            }
            let hits: Vec<_> = tree.search(&item.bbox).collect();
            prop_assert!(
                hits.iter().any(|hit| hit.id == item.id),
                "item {:?} not found by a search of its own bbox",
                item
            );
        }
    }

    #[test]
    fn test_deletion_keeps_tree_valid(
        marked in prop::collection::vec((arb_rectangle(), any::<bool>()), 1..40)
    ) {
        let rects: Vec<Rectangle> = marked.iter().map(|(r, _)| *r).collect();
        let items = items_from_rects(&rects);
        let mut tree: RTree<Item> = RTree::new();
        for item in &items {
            tree.insert(item.clone());
        }

        let mut survivors = Vec::new();
        for (item, &(_, delete)) in items.iter().zip(&marked) {
            if delete {
                let removed = tree.delete(item);
                prop_assert!(removed.is_ok(), "delete of a present item failed");
                tree.check();
            } else {
                survivors.push(item.clone());
            }
        }

        prop_assert_eq!(tree.len(), survivors.len());
        let found = ids_of(tree.search(&whole_plane()));
        let expected = ids_of(&survivors);
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn test_insert_delete_round_trip_preserves_results(
        rects in prop::collection::vec(arb_rectangle(), 1..30),
        extra in arb_rectangle(),
        window in arb_rectangle()
    ) {
        let items = items_from_rects(&rects);
        let mut tree: RTree<Item> = RTree::new();
        for item in &items {
            tree.insert(item.clone());
        }

        let before = ids_of(tree.search(&window));

        let extra_item = Item { id: u32::MAX, bbox: extra };
        tree.insert(extra_item.clone());
        prop_assert!(tree.delete(&extra_item).is_ok());
        tree.check();

        let after = ids_of(tree.search(&window));
        prop_assert_eq!(before, after);
    }

    #[test]
    fn test_delete_of_absent_item_is_an_error(
        rects in prop::collection::vec(arb_rectangle(), 1..20),
        absent in arb_rectangle()
    ) {
        let items = items_from_rects(&rects);
        let mut tree: RTree<Item> = RTree::new();
        for item in &items {
            tree.insert(item.clone());
        }

        // Ids are assigned from zero, so this one can never match a stored item.
        let ghost = Item { id: u32::MAX, bbox: absent };
        prop_assert!(tree.delete(&ghost).is_err());
        prop_assert_eq!(tree.len(), items.len());
    }
}
