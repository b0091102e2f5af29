extern crate mirage;

use num_bigint::BigInt;

use mirage::parser::parse;
use mirage::runner::compile;
use mirage::runner::ds::realm::Realm;
use mirage::runner::host::globals::register_core_types;
use mirage::runner::host::registry::HostRegistry;
use mirage::runner::run;

#[test]
fn test_full_pipeline_over_a_script() {
    let mut registry = HostRegistry::new();
    register_core_types(&mut registry);
    let realm = Realm::new(registry).unwrap();
    let globals = realm.instantiate("globals").unwrap();

    let source = "greeting = 'Hello!'\n\
                  log 'Hi!'\n\
                  count = 1_000\n\
                  ratio := 2.5\n\
                  tag = \"line\\nbreak\"\n";
    run(&realm, &globals, source).unwrap();

    assert_eq!(
        globals.variable("greeting").unwrap().as_str(),
        Some("Hello!")
    );
    assert_eq!(
        globals.variable("count").unwrap().as_int(),
        Some(&BigInt::from(1000))
    );
    assert_eq!(globals.variable("ratio").unwrap().as_decimal(), Some(2.5));
    assert_eq!(
        globals.variable("tag").unwrap().as_str(),
        Some("line\nbreak")
    );
}

#[test]
fn test_statements_render_for_inspection() {
    let statements = parse("x = 5\nlog 'Hi!'\ntick").unwrap();
    let rendered: Vec<String> = statements.iter().map(|s| s.to_string()).collect();
    assert_eq!(rendered[0], "assign(self, x, 5)");
    assert_eq!(rendered[1], "call(self, log, ['Hi!'])");
    assert_eq!(rendered[2], "call(self, tick, [])");
}

#[test]
fn test_program_renders_for_inspection() {
    let program = compile(&parse("x = 5").unwrap()).unwrap();
    let listing = program.disassemble("script");
    assert!(listing.starts_with("== script ==\n"));
    assert!(listing.contains("push_self"));
    assert!(listing.contains("push_int 5"));
    assert!(listing.contains("assign x"));
}
