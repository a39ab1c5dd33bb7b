pub use crate::data_structs::enums::{
    ExactMode,
    Group,
    Method,
    Strategy,
    Tail,
};
pub use crate::data_structs::observation::{
    Observation,
    RankedObservation,
    SampleSizes,
    TestResult,
};
pub use crate::error::{
    MwuError,
    MwuResult,
};
pub use crate::tools::mwu::{
    exact_p,
    exact_p_unchecked,
    normal_approximation,
    normal_approximation_with_ties,
    one_sided_u,
    rank_observations,
    uniform_approximation,
    ExactDistribution,
    MwuConfig,
    RankSumTester,
    RankedSample,
};
