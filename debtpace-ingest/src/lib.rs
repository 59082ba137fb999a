//! debtpace-ingest: turn hand-maintained CSV/JSON files into clean engine inputs
//!
//! The engine trusts its inputs; this crate is where sloppy money strings,
//! unknown debt types and repeated weeks get fixed up or rejected.

pub mod check_ins;
pub mod debts;
pub mod money;

pub use check_ins::{
    load_challenges, load_check_ins, normalize_check_ins, parse_challenges_csv,
    parse_check_ins_csv,
};
pub use debts::{load_debts, load_debts_json, parse_debts_csv};
pub use money::{parse_money, parse_optional_money};
