use steadyprobe::entry;
use steadyprobe::error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
