//! Round-trip benchmark harness for an external lossless PPM codec
//!
//! This module drives an encoder/decoder pair over a batch of P6 rasters,
//! verifies every round trip semantically and measures sizes against
//! pre-generated reference codec artifacts.

pub mod common;
pub mod ppm;
pub mod compare;
pub mod codec;
pub mod metrics;
pub mod batch;
pub mod report;
pub mod timing;

pub use common::{
    CodecError,
    CodecStage,
    FormatError,
    Result,
};

pub use ppm::{
    PpmReader,
    RasterHeader,
    RasterImage,
    RasterReader,
};

pub use compare::{
    ComparisonResult,
    SemanticComparator,
};

pub use codec::{
    Codec,
    CodecConfig,
    CodecConfigBuilder,
    ProcessCodec,
};

pub use metrics::{
    AggregateReport,
    ReferenceCodec,
    ReferenceTotals,
    TrialRecord,
    TrialStatus,
};

pub use batch::{
    BatchConfig,
    BatchConfigBuilder,
    BatchOrchestrator,
    BatchOutcome,
};

pub use timing::{parse_time_budget, TimeBudget, Timer};
