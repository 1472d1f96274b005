use bindump::bindata::{BinError, Compression, ContainerSpec, DecodeOptions, Schema};
use bindump_testkit::{ByteWriter, scratch_dir, write_scratch};

use super::{Job, run_job};
use crate::cmd::util::{OutputFormat, RenderArgs};

const SCHEMA: &str = r#"{
	"types": [
		{ "kind": "record", "name": "Cfg.ConfigLevel", "fields": [{ "name": "Level", "type": "int32" }] },
		{ "kind": "record", "name": "Cfg.ConfigAbility", "fields": [{ "name": "Name", "type": "string" }] },
		{ "kind": "record", "name": "Cfg.ConfigHeal", "base": "Cfg.ConfigAbility", "subtype_id": 1,
			"fields": [{ "name": "Amount", "type": "float" }] }
	]
}"#;

fn json_render() -> RenderArgs {
	RenderArgs {
		format: OutputFormat::Json,
		compact: true,
	}
}

fn schema() -> Schema {
	Schema::from_json_str(SCHEMA).expect("schema")
}

#[test]
fn derived_type_name_drives_decode() {
	let input = write_scratch("cli_decode_derived", "ConfigLevel_Main.bin", &[0x01, 0x0a]);
	let output = scratch_dir("cli_decode_derived").join("out.json");

	let job = Job {
		input: &input,
		output: Some(&output),
		spec: ContainerSpec::default(),
		type_name: None,
		compression: Compression::None,
	};
	run_job(&schema(), &job, &DecodeOptions::default(), &json_render()).expect("decode");

	let text = std::fs::read_to_string(&output).expect("output written");
	assert_eq!(text, "{\"Level\":5}\n");
}

#[test]
fn explicit_type_and_list_mode() {
	let bytes = ByteWriter::new()
		.varuint(2)
		.varuint(0)
		.u8(0b1)
		.string("a")
		.varuint(1)
		.u8(0b0)
		.u8(0b1)
		.f32(2.5)
		.into_bytes();
	let input = write_scratch("cli_decode_list", "abilities.bin", &bytes);
	let output = scratch_dir("cli_decode_list").join("out.json");

	let job = Job {
		input: &input,
		output: Some(&output),
		spec: "l".parse().expect("mode"),
		type_name: Some("ConfigAbility"),
		compression: Compression::None,
	};
	run_job(&schema(), &job, &DecodeOptions::default(), &json_render()).expect("decode");

	let text = std::fs::read_to_string(&output).expect("output written");
	assert_eq!(
		text,
		"[{\"$type\":\"ConfigAbility\",\"Name\":\"a\"},{\"$type\":\"ConfigHeal\",\"Amount\":2.5}]\n"
	);
}

#[test]
fn tree_format_writes_indented_text() {
	let input = write_scratch("cli_decode_tree", "ConfigLevel_x.bin", &[0x01, 0x0a]);
	let output = scratch_dir("cli_decode_tree").join("out.txt");
	let render = RenderArgs {
		format: OutputFormat::Tree,
		compact: false,
	};

	let job = Job {
		input: &input,
		output: Some(&output),
		spec: ContainerSpec::default(),
		type_name: None,
		compression: Compression::None,
	};
	run_job(&schema(), &job, &DecodeOptions::default(), &render).expect("decode");

	assert_eq!(std::fs::read_to_string(&output).expect("output"), "{\n  Level = 5\n}\n");
}

#[test]
fn underived_name_is_reported() {
	let input = write_scratch("cli_decode_underived", "LevelMetaData", &[0x01, 0x0a]);

	let job = Job {
		input: &input,
		output: None,
		spec: ContainerSpec::default(),
		type_name: None,
		compression: Compression::None,
	};
	let err = run_job(&schema(), &job, &DecodeOptions::default(), &json_render()).expect_err("no underscore");
	assert!(matches!(err, BinError::TypeNameNotDerivable { .. }));
}

#[test]
fn zstd_flag_inflates_input() {
	let packed = zstd::encode_all([0x01_u8, 0x0a].as_slice(), 3).expect("compress");
	let input = write_scratch("cli_decode_zstd", "ConfigLevel_packed.bin", &packed);
	let output = scratch_dir("cli_decode_zstd").join("out.json");

	let job = Job {
		input: &input,
		output: Some(&output),
		spec: ContainerSpec::default(),
		type_name: None,
		compression: Compression::Zstd,
	};
	run_job(&schema(), &job, &DecodeOptions::default(), &json_render()).expect("decode");

	assert_eq!(std::fs::read_to_string(&output).expect("output"), "{\"Level\":5}\n");
}
