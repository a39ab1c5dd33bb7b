/// ****************************************************************************
/// * Copyright (c) 2025
/// The Prosperity Public License 3.0.0
///
/// Contributor: [shitohana](https://github.com/shitohana)
/// ***************************************************************************
pub use {anyhow,
         itertools,
         log,
         pretty_env_logger,
         serde,
         serde_json,
         statrs};
