//! Demo scene
//!
//! A field of randomly placed obstacles, a few ghosts wandering between random
//! goals, and an observer that patrols between waypoints. Used by the binary
//! and the benchmarks.

use rand::Rng;

use crate::entities::{Actor, Obstacle};
use crate::world::PixelRect;

/// Sprite sizes obstacles are picked from, before scaling
const OBSTACLE_SIZES: [(i32, i32); 6] = [(24, 31), (24, 24), (24, 24), (16, 24), (48, 43), (16, 16)];
const OBSTACLE_SCALE: i32 = 3;
const ACTOR_SIZE: i32 = 48;
/// Ghost drift in pixels per tick
const GHOST_SPEED: i32 = 2;
/// Ghost goals stay this far inside the scene
const GOAL_MARGIN: i32 = 30;

/// Observer route
#[derive(Debug, Clone)]
pub struct Patrol {
    waypoints: Vec<(i32, i32)>,
    next: usize,
    /// Pixels per tick
    speed: i32,
}

impl Patrol {
    pub fn new(waypoints: Vec<(i32, i32)>, speed: i32) -> Self {
        Self {
            waypoints,
            next: 0,
            speed: speed.max(1),
        }
    }

    /// Move `pos` toward the current waypoint, cycling when it is reached
    pub fn advance(&mut self, pos: (i32, i32)) -> (i32, i32) {
        let Some(&target) = self.waypoints.get(self.next) else {
            return pos;
        };

        let step = |from: i32, to: i32| from + (to - from).clamp(-self.speed, self.speed);
        let moved = (step(pos.0, target.0), step(pos.1, target.1));

        if moved == target {
            self.next = (self.next + 1) % self.waypoints.len();
        }
        moved
    }
}

/// Everything the fog needs to know about the world for one tick
#[derive(Debug, Clone)]
pub struct Scene {
    pub size: (i32, i32),
    pub observer: PixelRect,
    pub ghosts: Vec<Actor>,
    /// Where each ghost is heading, by index
    pub ghost_goals: Vec<(i32, i32)>,
    pub obstacles: Vec<Obstacle>,
    pub patrol: Patrol,
}

impl Scene {
    /// Generate a scene filling `size` pixels
    pub fn generate<R: Rng>(rng: &mut R, size: (i32, i32), obstacles: usize, ghosts: usize) -> Self {
        let observer = PixelRect::new(100, 100, ACTOR_SIZE, ACTOR_SIZE);
        let obstacles = generate_obstacles(rng, size, obstacles, 1000, &observer);

        let ghosts: Vec<Actor> = (0..ghosts)
            .map(|i| {
                let x = rng.gen_range(0..(size.0 - ACTOR_SIZE).max(1));
                let y = rng.gen_range(0..(size.1 - ACTOR_SIZE).max(1));
                Actor::new(format!("ghost-{}", i), PixelRect::new(x, y, ACTOR_SIZE, ACTOR_SIZE))
            })
            .collect();
        let ghost_goals: Vec<(i32, i32)> = ghosts.iter().map(|_| random_goal(rng, size)).collect();

        let (w, h) = (size.0 - ACTOR_SIZE, size.1 - ACTOR_SIZE);
        let patrol = Patrol::new(
            vec![(w * 3 / 4, 100), (w * 3 / 4, h * 3 / 4), (100, h * 3 / 4), (100, 100)],
            4,
        );

        log::info!(
            "Generated scene {}x{}px with {} obstacles and {} ghosts",
            size.0,
            size.1,
            obstacles.len(),
            ghosts.len()
        );

        Self {
            size,
            observer,
            ghosts,
            ghost_goals,
            obstacles,
            patrol,
        }
    }

    /// Move the observer one step along its patrol and drift every ghost
    /// toward its goal, picking a new goal once it arrives. Everything stays
    /// on screen.
    pub fn step<R: Rng>(&mut self, rng: &mut R) {
        let (x, y) = self.patrol.advance((self.observer.x, self.observer.y));
        self.observer.x = x.clamp(0, (self.size.0 - self.observer.width).max(0));
        self.observer.y = y.clamp(0, (self.size.1 - self.observer.height).max(0));

        let size = self.size;
        let drift = |from: i32, to: i32| from + (to - from).clamp(-GHOST_SPEED, GHOST_SPEED);
        for (ghost, goal) in self.ghosts.iter_mut().zip(self.ghost_goals.iter_mut()) {
            let max_x = (size.0 - ghost.rect.width).max(0);
            let max_y = (size.1 - ghost.rect.height).max(0);
            ghost.rect.x = drift(ghost.rect.x, goal.0).clamp(0, max_x);
            ghost.rect.y = drift(ghost.rect.y, goal.1).clamp(0, max_y);

            if (ghost.rect.x, ghost.rect.y) == *goal {
                *goal = random_goal(rng, size);
            }
        }
    }
}

/// A ghost's top-left target inside the scene, away from the edges
fn random_goal<R: Rng>(rng: &mut R, size: (i32, i32)) -> (i32, i32) {
    let max_x = (size.0 - ACTOR_SIZE - GOAL_MARGIN).max(0);
    let max_y = (size.1 - ACTOR_SIZE - GOAL_MARGIN).max(0);
    (
        rng.gen_range(GOAL_MARGIN.min(max_x)..=max_x),
        rng.gen_range(GOAL_MARGIN.min(max_y)..=max_y),
    )
}

/// Place up to `count` non-overlapping obstacles, giving up after `max_tries`
pub fn generate_obstacles<R: Rng>(
    rng: &mut R,
    size: (i32, i32),
    count: usize,
    max_tries: usize,
    keep_clear: &PixelRect,
) -> Vec<Obstacle> {
    let mut placed: Vec<Obstacle> = Vec::with_capacity(count);
    let mut tries = 0;

    while placed.len() < count && tries < max_tries {
        tries += 1;

        let (w, h) = OBSTACLE_SIZES[rng.gen_range(0..OBSTACLE_SIZES.len())];
        let (w, h) = (w * OBSTACLE_SCALE, h * OBSTACLE_SCALE);
        if w >= size.0 || h >= size.1 {
            continue;
        }

        let rect = PixelRect::new(rng.gen_range(0..size.0 - w), rng.gen_range(0..size.1 - h), w, h);
        if rect.intersects(keep_clear) || placed.iter().any(|o| o.rect.intersects(&rect)) {
            continue;
        }

        // Only the lower half of a sprite is solid
        let bbox = PixelRect::new(0, h / 2, w, h - h / 2);
        placed.push(Obstacle::with_bbox(rect, bbox));
    }

    if placed.len() < count {
        log::debug!("Placed {} of {} obstacles after {} tries", placed.len(), count, tries);
    }
    placed
}
