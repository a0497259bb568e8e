mod classifier;
mod common;
mod eligibility;
