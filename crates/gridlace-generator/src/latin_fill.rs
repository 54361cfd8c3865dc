use gridlace_core::{Grid, Position, PuzzleRng};
use rand::seq::SliceRandom as _;

/// Fills a random `order`×`order` Latin square with values `1..=order`.
///
/// Rows are filled one at a time by a randomized bipartite matching between
/// columns and the values still missing from each column. A Latin rectangle
/// always extends by one more row, so no backtracking across rows is needed.
///
/// # Examples
///
/// ```
/// use gridlace_core::Position;
/// use gridlace_generator::{PuzzleSeed, random_latin_square};
///
/// let mut rng = PuzzleSeed::new([0; 32]).rng();
/// let square = random_latin_square(5, &mut rng);
///
/// for y in 0..5 {
///     let mut row: Vec<u8> = (0..5).map(|x| square[Position::new(x, y)]).collect();
///     row.sort_unstable();
///     assert_eq!(row, [1, 2, 3, 4, 5]);
/// }
/// ```
#[must_use]
pub fn random_latin_square(order: usize, rng: &mut PuzzleRng) -> Grid<u8> {
    let mut grid = Grid::new(order, order, 0_u8);
    let mut used = vec![vec![false; order]; order];

    for y in 0..order {
        let mut columns: Vec<usize> = (0..order).collect();
        columns.shuffle(rng);
        let adjacency: Vec<Vec<usize>> = (0..order)
            .map(|x| {
                let mut values: Vec<usize> = (0..order).filter(|&v| !used[x][v]).collect();
                values.shuffle(rng);
                values
            })
            .collect();

        let mut owner: Vec<Option<usize>> = vec![None; order];
        for &x in &columns {
            let mut visited = vec![false; order];
            let matched = augment(x, &adjacency, &mut owner, &mut visited);
            debug_assert!(matched, "a Latin rectangle always extends");
        }

        for (v, x) in owner.iter().enumerate() {
            if let Some(x) = *x {
                used[x][v] = true;
                #[expect(clippy::cast_possible_truncation)]
                let value = (v + 1) as u8;
                grid[Position::new(x, y)] = value;
            }
        }
    }
    grid
}

fn augment(
    x: usize,
    adjacency: &[Vec<usize>],
    owner: &mut [Option<usize>],
    visited: &mut [bool],
) -> bool {
    for &v in &adjacency[x] {
        if visited[v] {
            continue;
        }
        visited[v] = true;
        if owner[v].is_none_or(|other| augment(other, adjacency, owner, visited)) {
            owner[v] = Some(x);
            return true;
        }
    }
    false
}
