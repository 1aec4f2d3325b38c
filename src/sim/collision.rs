//! Collision detection against the live row window
//!
//! Queries outside the window are never collisions: there is simply no
//! obstacle data there yet.

use super::state::Row;

/// True iff `course_rows[row][x]` is a wall. Total over all integers.
pub fn check_collision<'a, I>(x: isize, row: isize, course_rows: I) -> bool
where
    I: IntoIterator<Item = &'a Row>,
{
    if x < 0 || row < 0 {
        return false;
    }
    course_rows
        .into_iter()
        .nth(row as usize)
        .and_then(|r| r.get(x as usize))
        .is_some_and(|cell| cell.is_wall())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::CourseRows;

    fn window() -> CourseRows {
        CourseRows::from(vec![
            Row::from_template("■■■■   ■■"),
            Row::from_template("   ■■■■■■"),
        ])
    }

    #[test]
    fn test_wall_and_open_cells() {
        let rows = window();
        assert!(check_collision(3, 0, &rows));
        assert!(!check_collision(4, 0, &rows));
        assert!(check_collision(8, 0, &rows));
        assert!(!check_collision(0, 1, &rows));
        assert!(check_collision(3, 1, &rows));
    }

    #[test]
    fn test_out_of_range_is_not_a_collision() {
        let rows = window();
        assert!(!check_collision(-1, 0, &rows));
        assert!(!check_collision(9, 0, &rows));
        assert!(!check_collision(0, 2, &rows));
        assert!(!check_collision(0, -1, &rows));
        assert!(!check_collision(isize::MAX, isize::MIN, &rows));
        assert!(!check_collision(0, 0, &CourseRows::new()));
    }
}
