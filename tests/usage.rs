use mtree::{MTree, Point};

#[test]
fn points_of_interest() {
    // A small city guide: venues indexed by latitude and longitude.
    let mut tree = MTree::new(2).expect("Invalid node size");
    let venues = [
        ("Restaurant A", [40.7128, -74.0060]),
        ("Park B", [40.7158, -74.0020]),
        ("Store C", [40.7120, -74.0100]),
        ("Museum D", [40.7200, -74.0000]),
        ("Restaurant E", [40.7250, -74.0050]),
    ];
    for (name, coords) in venues {
        tree.insert(Point::new(coords.to_vec(), name)).unwrap();
    }
    assert_eq!(tree.len(), 5);
    assert_eq!(tree.dimension(), Some(2));

    // Everything close to the user's location, payloads intact.
    let nearby = tree.search(&[40.7130, -74.0060], 0.005).unwrap();
    let mut names: Vec<&str> = nearby.iter().map(|venue| venue.data).collect();
    names.sort_unstable();
    assert_eq!(names, ["Park B", "Restaurant A", "Store C"]);

    // Far from every venue: an empty result, not an error; presenting
    // "no points found" is the caller's job.
    assert!(tree.search(&[0.0, 0.0], 0.01).unwrap().is_empty());

    // A wide enough radius returns the whole dataset.
    assert_eq!(tree.search(&[40.7180, -74.0040], 1.0).unwrap().len(), 5);
}
