pub const WHITE_LIST_SEED: &[u8] = b"white_list";
pub const EXTRA_ACCOUNT_METAS_SEED: &[u8] = b"extra-account-metas";

/// Keeps `WhiteList::space` below the 10 KiB limit for accounts created via CPI.
pub const MAX_WHITE_LIST_CAPACITY: u16 = 300;

pub const MAX_EXTRA_ACCOUNT_METAS: u8 = 16;
