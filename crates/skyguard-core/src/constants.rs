//! Simulation constants and tuning parameters.

// --- Playfield ---

/// Playfield width.
pub const FIELD_WIDTH: f64 = 640.0;

/// Playfield height.
pub const FIELD_HEIGHT: f64 = 480.0;

/// Ground line. Anything at or below this y has hit the ground.
pub const GROUND_Y: f64 = 440.0;

/// Default driver step rate (Hz) for headless runs.
pub const TICK_RATE: u32 = 60;

/// Seconds per step at the default rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Defended assets ---

/// Number of cities.
pub const CITY_COUNT: usize = 6;

/// City x positions, left to right. Ids follow index order.
pub const CITY_POSITIONS: [f64; CITY_COUNT] = [40.0, 120.0, 200.0, 400.0, 480.0, 560.0];

/// Seconds a city flashes after destruction.
pub const CITY_FLASH_SECS: f64 = 0.15;

// --- Launch sites ---

/// Number of launch sites.
pub const LAUNCH_SITE_COUNT: usize = 3;

/// Launch site x positions. Ids follow index order.
pub const LAUNCH_SITE_POSITIONS: [f64; LAUNCH_SITE_COUNT] = [80.0, 320.0, 560.0];

/// Rounds per launch site at the start of each wave.
pub const LAUNCH_SITE_MAX_AMMO: u32 = 10;

/// Counter-projectile speed (units/s).
pub const COUNTER_PROJECTILE_SPEED: f64 = 400.0;

// --- Blasts ---

/// Fully expanded blast radius.
pub const BLAST_MAX_RADIUS: f64 = 40.0;

/// Expanding phase duration (s).
pub const BLAST_EXPAND_SECS: f64 = 0.3;

/// Lingering phase duration (s).
pub const BLAST_LINGER_SECS: f64 = 0.5;

/// Fading phase duration (s).
pub const BLAST_FADE_SECS: f64 = 0.2;

// --- Waves ---

/// Enemy projectile speed on wave 1 (units/s).
pub const INITIAL_PROJECTILE_SPEED: f64 = 60.0;

/// Speed added per wave after the first.
pub const PROJECTILE_SPEED_INCREMENT: f64 = 10.0;

/// Speed cap.
pub const MAX_PROJECTILE_SPEED: f64 = 200.0;

/// Enemy projectiles on wave 1.
pub const INITIAL_PROJECTILE_COUNT: u32 = 4;

/// Projectiles added per wave after the first.
pub const PROJECTILE_COUNT_INCREMENT: u32 = 2;

/// Projectile count cap.
pub const MAX_PROJECTILE_COUNT: u32 = 20;

/// Window over which a wave's projectiles are released (s).
pub const WAVE_SPAWN_DURATION_SECS: f64 = 5.0;

/// Horizontal margin kept clear of spawn points at each field edge.
pub const SPAWN_EDGE_MARGIN: f64 = 20.0;

// --- Collision ---

/// Max |dx| between an impact and a ground asset for the asset to be hit.
pub const HIT_RADIUS: f64 = 30.0;

// --- Scoring ---

/// Points per projectile destroyed by a blast.
pub const SCORE_PROJECTILE_KILL: u64 = 25;

/// End-of-wave points per surviving city.
pub const SCORE_CITY_BONUS: u64 = 100;

/// End-of-wave points per unspent round at a surviving launch site.
pub const SCORE_AMMO_BONUS: u64 = 5;

/// Every multiple of this score revives one destroyed city.
pub const BONUS_CITY_SCORE: u64 = 10_000;

// --- Debris ---

/// Particles thrown up when a city is destroyed.
pub const DEBRIS_COUNT: usize = 15;

/// Debris spawn point height above the ground line.
pub const DEBRIS_ORIGIN_OFFSET: f64 = 15.0;

/// Downward acceleration applied to debris (units/s²).
pub const DEBRIS_GRAVITY: f64 = 200.0;

/// Minimum debris launch speed.
pub const DEBRIS_MIN_SPEED: f64 = 100.0;

/// Random extra launch speed on top of the minimum.
pub const DEBRIS_SPEED_SPREAD: f64 = 150.0;

/// Minimum debris lifetime (s).
pub const DEBRIS_MIN_LIFE_SECS: f64 = 0.5;

/// Random extra lifetime on top of the minimum.
pub const DEBRIS_LIFE_SPREAD_SECS: f64 = 0.5;

/// Minimum particle size.
pub const DEBRIS_MIN_SIZE: f64 = 2.0;

/// Random extra size on top of the minimum.
pub const DEBRIS_SIZE_SPREAD: f64 = 4.0;

/// Debris colors (RGB): greens, white, yellow.
pub const DEBRIS_PALETTE: [[u8; 3]; 5] = [
    [0x00, 0xff, 0x00],
    [0x00, 0xcc, 0x00],
    [0x00, 0x99, 0x00],
    [0xff, 0xff, 0xff],
    [0xff, 0xff, 0x00],
];
