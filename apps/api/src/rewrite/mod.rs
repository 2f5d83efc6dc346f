// Rewrite engine: segmentation, keyword placement, marketability finishing.
// Strategy selection (mark vs phrase) happens at startup; handlers only ever
// see the ContentRewriter.

pub mod engine;
pub mod finisher;
pub mod handlers;
pub mod highlighter;
pub mod placer;
pub mod segmenter;
