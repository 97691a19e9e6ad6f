use sparse_tree_matrix::{Matrix, DimensionMismatchError};

#[test]
fn assignment_through_handles() {
    let mut m = Matrix::<i32, 2>::with_default(-1);
    m.at(100).cell(100).set(314);
    assert_eq!(m.size(), 1);
    assert_eq!(m[[100, 100]], 314);

    m.at(100).cell(100).set(2).set(4).set(8);
    assert_eq!(m[[100, 100]], 8);
    assert_eq!(m.size(), 1);
}

#[test]
fn default_assignments_are_never_stored() {
    let mut m = Matrix::<i32, 1>::new();
    m.cell(1).set(5);
    m.cell(8).set(4);
    m.cell(2).set(9);
    m.cell(3).set(0);
    let values: Vec<i32> = m.values().copied().collect();
    assert_eq!(values, [5, 9, 4]);
    assert!(!values.contains(&0));
    assert_eq!(m.size(), 3);
    let keys: Vec<[usize; 1]> = m.keys().collect();
    assert_eq!(keys, [[1], [2], [8]]);
}

#[test]
fn zero_dimensional_equality() {
    let fresh = Matrix::<i32, 0>::with_default(3);
    assert_eq!(fresh, 3);
    assert_eq!(fresh, Matrix::<i32, 0>::with_default(3));
    assert_ne!(fresh, Matrix::<i32, 0>::with_default(4));

    // Only the value counts, not how it came about
    let mut assigned = Matrix::<i32, 0>::with_default(2);
    assigned.set_value(3);
    assert_eq!(assigned, fresh);
    assert_eq!(assigned.size(), 1);
    assert_eq!(fresh.size(), 0);
}

#[test]
fn diagonals_of_a_square() {
    let mut m = Matrix::<usize, 2>::new();
    for i in 0..10 {
        m.at(i).cell(i).set(i);
        m.at(i).cell(9 - i).set(9 - i);
    }
    // [0, 0] and [9, 0] get the default, and the diagonals of an even square never cross
    assert_eq!(m.size(), 18);
    for ([row, column], &value) in &m {
        assert!(row == column || row + column == 9);
        assert_eq!(value, column);
    }
    assert!(!m.contains([0, 0]));
    assert_eq!(m[[0, 9]], 9);
    assert_eq!(m[[9, 0]], 0);
}

#[test]
fn cell_addressing_round_trips() {
    let mut m = Matrix::<u64, 4>::new();
    let coords = [[0, 0, 0, 0], [1, 2, 3, 4], [1, 2, 3, 5], [1, 2, 9, 0], [7, 0, 0, 7]];
    for (n, &c) in coords.iter().enumerate() {
        m.set(c, n as u64 + 1);
    }
    let keys: Vec<[usize; 4]> = m.keys().collect();
    assert_eq!(keys, coords);
    for &c in &coords {
        assert_eq!(m.cell_at(c).coords(), c);
    }
}

#[test]
fn slice_coordinates_must_match_the_dimension() {
    let mut m = Matrix::<u8, 3>::new();
    assert_eq!(
        m.try_set(&[1, 2], 3),
        Err(DimensionMismatchError { expected: 3, found: 2 }),
    );
    assert!(m.is_empty());
    let error: Box<dyn std::error::Error> = Box::new(m.try_get(&[]).unwrap_err());
    assert_eq!(error.to_string(), "expected 3 coordinates to address a cell, found 0");
}

#[test]
fn scalars_from_values() {
    let scalar: Matrix<String, 0> = String::from("text").into();
    assert_eq!(scalar, String::from("text"));
    assert_eq!(scalar.default_value(), "");
    assert_eq!(scalar.dimensions(), 0);
}
