//! Turns a finished search into a timeline of cell updates. The visitation trace is shown one
//! cell every `visit_delay`; once the whole trace is on screen the path follows one cell every
//! `path_delay`.
use grid_dijkstra::{Point, SearchOutcome};
use std::time::Duration;

use crate::render::Overlay;

pub const VISIT_DELAY_MS: u64 = 10;
pub const PATH_DELAY_MS: u64 = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackConfig {
    pub visit_delay: Duration,
    pub path_delay: Duration,
}

impl Default for PlaybackConfig {
    fn default() -> PlaybackConfig {
        PlaybackConfig {
            visit_delay: Duration::from_millis(VISIT_DELAY_MS),
            path_delay: Duration::from_millis(PATH_DELAY_MS),
        }
    }
}

/// A single timed update: at `at` after playback started, `point` gets `overlay`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pub at: Duration,
    pub point: Point,
    pub overlay: Overlay,
}

/// Frames for `trace` followed by `path`, sorted by time.
pub fn schedule(trace: &[Point], path: &[Point], config: &PlaybackConfig) -> Vec<Frame> {
    let path_offset = config.visit_delay * trace.len() as u32;
    let visits = trace.iter().enumerate().map(|(i, &point)| Frame {
        at: config.visit_delay * i as u32,
        point,
        overlay: Overlay::Visited,
    });
    let steps = path.iter().enumerate().map(|(j, &point)| Frame {
        at: path_offset + config.path_delay * j as u32,
        point,
        overlay: Overlay::Path,
    });
    visits.chain(steps).collect()
}

/// Schedules a search outcome. The path is only played when the finish was found.
pub fn schedule_outcome(outcome: &SearchOutcome, config: &PlaybackConfig) -> Vec<Frame> {
    let path = if outcome.found() {
        outcome.path()
    } else {
        Vec::new()
    };
    schedule(&outcome.trace, &path, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_dijkstra::{cell, search, Board};

    #[test]
    fn timings_follow_delays() {
        let trace = [cell(0, 0), cell(0, 1), cell(1, 0)];
        let path = [cell(0, 0), cell(0, 1)];
        let frames = schedule(&trace, &path, &PlaybackConfig::default());
        let times = frames
            .iter()
            .map(|f| f.at.as_millis())
            .collect::<Vec<_>>();
        assert_eq!(times, vec![0, 10, 20, 30, 80]);
        assert!(frames[..3].iter().all(|f| f.overlay == Overlay::Visited));
        assert!(frames[3..].iter().all(|f| f.overlay == Overlay::Path));
        assert_eq!(frames[4].point, cell(0, 1));
    }

    #[test]
    fn exhausted_search_has_no_path_frames() {
        let board: Board = "S#F".parse().unwrap();
        let outcome = search(&board);
        let frames = schedule_outcome(&outcome, &PlaybackConfig::default());
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].point, board.start());
    }

    #[test]
    fn found_search_plays_whole_path() {
        let board = Board::new(2, 3, cell(0, 0), cell(1, 2)).unwrap();
        let outcome = search(&board);
        let config = PlaybackConfig {
            visit_delay: Duration::from_millis(1),
            path_delay: Duration::from_millis(2),
        };
        let frames = schedule_outcome(&outcome, &config);
        let path_frames = frames
            .iter()
            .filter(|f| f.overlay == Overlay::Path)
            .collect::<Vec<_>>();
        assert_eq!(path_frames.len(), 4);
        assert_eq!(path_frames[0].at, Duration::from_millis(outcome.trace.len() as u64));
        assert!(frames.windows(2).all(|w| w[0].at <= w[1].at));
    }
}
