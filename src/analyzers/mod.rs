pub mod heat_index;
pub mod normals;
pub mod ranking;
pub mod window;

pub use heat_index::apparent_temperature;
pub use normals::{climatology_normal, ClimatologyNormal, NormalSource};
pub use ranking::{extreme_record, rank_and_percentile, top_n, RankResult};
pub use window::{trailing_window_stats, TrailingWindowStats, WindowRank, YearlyWindowAverage};
