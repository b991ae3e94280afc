/// Occupancy grid with the listed `(row, column)` bins set.
#[must_use]
pub fn occupancy(size: usize, occupied: &[(usize, usize)]) -> Vec<u8> {
    let mut grid = vec![0_u8; size * size];
    for &(row, column) in occupied {
        grid[row * size + column] = 1;
    }
    grid
}
