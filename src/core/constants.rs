/// Basis-point denominator shared by every fee and impact computation.
pub const BPS: u32 = 10_000;
