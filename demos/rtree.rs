use rtree2d::geometry::Rectangle;
use rtree2d::rtree::{RTree, RTreeObject};

// A payload with an id; equality of the id is what `delete` matches on.
#[derive(Debug, Clone, PartialEq)]
struct Shape {
    id: u32,
    name: &'static str,
    bbox: Rectangle,
}

impl RTreeObject for Shape {
    fn mbr(&self) -> Rectangle {
        self.bbox
    }
}

fn main() {
    println!("--- rtree2d Example ---");
    let mut tree: RTree<Shape> = RTree::new();

    // Insert some shapes
    let shapes = [
        Shape { id: 1, name: "pump", bbox: Rectangle::from_edges(10, 10, 40, 30) },
        Shape { id: 2, name: "valve", bbox: Rectangle::from_edges(50, 10, 70, 25) },
        Shape { id: 3, name: "tank", bbox: Rectangle::from_edges(100, 50, 180, 120) },
        Shape { id: 4, name: "pipe", bbox: Rectangle::from_edges(35, 18, 105, 22) },
        Shape { id: 5, name: "gauge", bbox: Rectangle::from_edges(60, 60, 75, 75) },
    ];
    for shape in &shapes {
        tree.insert(shape.clone());
    }
    println!("Tree after {} inserts: {:?}", tree.len(), tree);

    // Query a window and print what it hits
    let window = Rectangle::from_edges(30, 15, 65, 40);
    let hits: Vec<&Shape> = tree.search(&window).collect();
    println!("Shapes overlapping {:?}:", window);
    for shape in &hits {
        println!("  #{} {}", shape.id, shape.name);
    }

    // Delete a shape and search again
    let removed = tree.delete(&shapes[1]).expect("valve is in the tree");
    println!("Deleted #{} {}", removed.id, removed.name);

    let hits_after: Vec<&Shape> = tree.search(&window).collect();
    println!("After deletion the same window hits {} shapes", hits_after.len());

    // Dump the tree structure
    println!("{:#?}", tree);
}
