/// Ledger and cashflow CSV writers.
pub mod export;
