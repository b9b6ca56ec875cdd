use clap::Parser;

use crate::error::{AppError, AppResult};

use super::{ProbeArgs, normalize_flag_style};

pub(crate) fn parse_test_args<I, T>(args: I) -> AppResult<ProbeArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString>,
{
    ProbeArgs::try_parse_from(normalize_flag_style(args)).map_err(AppError::from)
}
