use example_command::{RUNTIME, VERSION, greeting};

fn main() {
  let program = std::env::args_os()
    .next()
    .map(|arg| arg.to_string_lossy().into_owned())
    .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_owned());

  println!("{}", greeting(&program, VERSION, RUNTIME));
}
