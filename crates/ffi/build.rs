use std::env;
use std::path::PathBuf;

fn main() {
    let crate_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let output_file = PathBuf::from(&crate_dir)
        .join("../../AbsolutionFx.h")
        .display()
        .to_string();

    // InstanceRaw lives in the core crate, so it has to be parsed too
    cbindgen::Builder::new()
        .with_crate(crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("ABSOLUTION_FX_H")
        .with_documentation(true)
        .with_pragma_once(false)
        .with_parse_deps(true)
        .with_parse_include(&["absolution-fx-core"])
        .generate()
        .expect("Unable to generate C bindings")
        .write_to_file(output_file);

    println!("cargo:rerun-if-changed=src");
}
