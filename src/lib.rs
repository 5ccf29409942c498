//! # modflow-kit
//!
//! `modflow-kit` builds MODFLOW-2005 and MODFLOW-NWT groundwater models from Rust, runs the
//! simulator as an external program and reads back what it wrote.  The simulator itself is not
//! part of this crate, it must be installed and found on the `PATH` or configured with
//! [`RunConfig`].
//!
//! A model is a [`Model`] holding a [`Discretization`] and a set of packages.  Writing the model
//! produces the name file and one free-format input file per package, running it launches the
//! simulator in the model workspace, and the [`output`] readers load the binary head and budget
//! files and the stream listing afterwards.
//!
//! Boundary conditions that change over time are given as [`StressPeriodData`], a sparse map
//! from stress period to records with an optional per-period control signal.
//!
//! ## Example
//!
//! ```
//! use modflow_kit::{StressPeriodData, WellRecord, itmp_codes};
//!
//! let well = WellRecord::new(0, 5, 5, -100.0);
//! let spd = StressPeriodData::new()
//!     .with_period(0, vec![well])
//!     .with_period(2, vec![well]);
//!
//! // period 1 is missing from the map, so no well pumps in it
//! let resolved = spd.resolve(3).expect("valid stress periods");
//! assert!(resolved[1].is_empty());
//! assert_eq!(itmp_codes(&resolved), vec![1, 0, 1]);
//! ```
pub mod array;
pub mod config;
pub mod error;
pub mod export;
pub mod grid;
pub mod model;
pub mod output;
pub mod packages;
pub mod postprocess;
pub mod scenario;
pub mod stress;
pub mod time;

pub use array::{Array1d, Array2d, Array3d};
pub use config::{RunConfig, Version};
pub use error::{ModflowError, Result, StressPeriodError};
pub use grid::{Grid, IBound};
pub use model::{Model, RunReport};
pub use output::{CellBudgetFile, HeadFile, Precision, SfrOutput};
pub use packages::{
    Basic, BudgetOutput, Discretization, FlowProperties, LayerProperty, LossType, Mnw2Rate,
    Mnw2Well, MultiNodeWell, Nwt, NwtOptions, OcAction, OutputControl, Package, PackageKind, Pcg,
    ReachRecord, Recharge, RechargeOption, River, RiverRecord, SegmentRecord, StreamFlow,
    UpstreamWeighting, Well, WellNode, WellRecord,
};
pub use scenario::{ScenarioOutput, capture_fractions};
pub use stress::{PeriodData, StressPeriodData, carry_forward, itmp_codes};
pub use time::{LengthUnit, StressPeriod, TimeUnit};
