use std::process::ExitCode;

fn main() -> ExitCode {
    blogly_api::main()
}
