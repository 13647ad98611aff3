use rtree2d::geometry::Rectangle;
use rtree2d::rtree::{RTree, RTreeObject};
use serde::{Deserialize, Serialize};

type Anyhow = Result<(), Box<dyn std::error::Error>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Tag {
    id: u32,
    bbox: Rectangle,
}

impl RTreeObject for Tag {
    fn mbr(&self) -> Rectangle {
        self.bbox
    }
}

fn sample_tree() -> RTree<Tag> {
    let mut tree: RTree<Tag> = RTree::new();
    for id in 0..12u32 {
        let x = id * 15;
        tree.insert(Tag {
            id,
            bbox: Rectangle::from_edges(x, x, x + 10, x + 10),
        });
    }
    tree
}

#[test]
fn test_rtree_serialization_round_trip() -> Anyhow {
    let tree = sample_tree();

    let encoded: Vec<u8> = bincode::serialize(&tree)?;
    let decoded: RTree<Tag> = bincode::deserialize(&encoded[..])?;

    decoded.check();
    assert_eq!(tree.len(), decoded.len());
    assert_eq!(tree.height(), decoded.height());

    let window = Rectangle::from_edges(0, 0, 200, 200);
    let mut original: Vec<u32> = tree.search(&window).map(|t| t.id).collect();
    let mut restored: Vec<u32> = decoded.search(&window).map(|t| t.id).collect();
    original.sort_unstable();
    restored.sort_unstable();
    assert_eq!(original, restored);
    Ok(())
}

#[test]
fn test_deserialized_tree_stays_mutable() -> Anyhow {
    let tree = sample_tree();
    let encoded: Vec<u8> = bincode::serialize(&tree)?;
    let mut decoded: RTree<Tag> = bincode::deserialize(&encoded[..])?;

    let extra = Tag {
        id: 99,
        bbox: Rectangle::from_edges(500, 500, 510, 510),
    };
    decoded.insert(extra.clone());
    assert_eq!(decoded.len(), tree.len() + 1);
    assert_eq!(decoded.delete(&extra)?.id, 99);
    decoded.check();
    assert_eq!(decoded.len(), tree.len());
    Ok(())
}
