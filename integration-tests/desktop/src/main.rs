use colored::Colorize as _;

macro_rules! tests {
  ($($name:expr, $module:ident),*) => {
    // declare the modules for all tests
    $(
      mod $module;
    )*

    // list of all available integration tests
    const TEST_NAMES: &[&str] = &[$( $name ),*];

    // run a given test
    fn run_test(name: &str) {
      $(
        if name == $name {
          $module::fixture();
          println!("{} {}", name.green(), "passed".green());
          return;
        }
      )*

      println!("{} is not a valid test. Possible values", name.red());
      print_test_names();
    }
  }
}

tests! {
  "compile-error", compile_error,
  "link-error", link_error,
  "inactive-uniform", inactive_uniform,
  "indexed-draw", indexed_draw,
  "second-backend", second_backend,
  "nul-source", nul_source,
  "nul-uniform", nul_uniform,
  "two-draw-objects", two_objects
}

fn print_test_names() {
  for test_name in TEST_NAMES {
    println!("  -> {}", test_name.blue());
  }
}

fn main() {
  let test_name = std::env::args().nth(1);

  if let Some(test_name) = test_name {
    println!("test name: {}", test_name.green());

    run_test(&test_name);
  } else {
    println!("Please provide a test name. Possible values");
    print_test_names();
  }
}
