use crate::{
    generators::DirectionShuffle,
    maze::{CellKind, Direction, Grid, Position, connector_between},
};

/// One room on the backtrack stack, with the directions it still has to try.
struct Frame {
    room: (u16, u16),
    directions: [Direction; 4],
    next: usize,
}

/// Carve a spanning tree over the `rows x cols` room lattice of `grid`.
///
/// This is the recursive backtracker unrolled onto an explicit stack: each frame keeps its own
/// shuffled direction list and cursor, so after a child room is exhausted the parent resumes
/// exactly where the recursive version would.
pub(super) fn recursive_backtrack<S: DirectionShuffle + ?Sized>(
    grid: &mut Grid,
    rows: u16,
    cols: u16,
    shuffle: &mut S,
) {
    if rows == 0 || cols == 0 {
        return;
    }

    // Arena of visited flags, one per room
    let mut visited = vec![false; rows as usize * cols as usize];
    let room_index = |room: (u16, u16)| room.0 as usize * cols as usize + room.1 as usize;

    let mut enter = |room: (u16, u16), grid: &mut Grid, visited: &mut Vec<bool>| -> Frame {
        visited[room_index(room)] = true;
        grid.set(Position::of_room(room.0, room.1), CellKind::Passage);
        let mut directions = Direction::ALL;
        shuffle.shuffle_directions(&mut directions);
        Frame {
            room,
            directions,
            next: 0,
        }
    };

    let mut stack = vec![enter((0, 0), grid, &mut visited)];
    let mut carved = 0usize;

    while let Some(frame) = stack.last_mut() {
        let Some(&direction) = frame.directions.get(frame.next) else {
            // Every direction tried, backtrack
            stack.pop();
            continue;
        };
        frame.next += 1;

        let room = frame.room;
        let Some(neighbor) = direction.step(room, rows, cols) else {
            continue;
        };
        if visited[room_index(neighbor)] {
            continue;
        }

        let wall = connector_between(room, neighbor);
        grid.set(wall, CellKind::Passage);
        carved += 1;
        tracing::trace!("[generator] carve {:?} from {:?} through {}", direction, room, wall);

        let child = enter(neighbor, grid, &mut visited);
        stack.push(child);
    }

    tracing::debug!("[generator] opened {} connectors", carved);
}
