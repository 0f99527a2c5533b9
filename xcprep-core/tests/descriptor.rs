use xcprep_core::descriptor::{patch_descriptor, WARNING_SETTINGS};

const DESCRIPTOR: &str = r#"// !$*UTF8*$!
{
	archiveVersion = 1;
	classes = {
	};
	objectVersion = 46;
	objects = {

/* Begin PBXLegacyTarget section */
		123456789012345678901234 /* App */ = {
			isa = PBXLegacyTarget;
			buildToolPath = ./fbuild;
			name = App;
		};
/* End PBXLegacyTarget section */

/* Begin PBXNativeTarget section */
		987654321098765432109876 /* App */ = {
			isa = PBXNativeTarget;
			name = App;
			productType = "com.apple.product-type.tool";
		};
/* End PBXNativeTarget section */

/* Begin XCBuildConfiguration section */
		AAAAAAAAAAAAAAAAAAAAAAA1 /* Debug */ = {
			isa = XCBuildConfiguration;
			buildSettings = {
			};
			name = Debug;
		};
		AAAAAAAAAAAAAAAAAAAAAAA2 /* Release */ = {
			isa = XCBuildConfiguration;
			buildSettings = {
			};
			name = Release;
		};
/* End XCBuildConfiguration section */
	};
	rootObject = 111111111111111111111111 /* Project object */;
}
"#;

fn count_containing(text: &str, needle: &str) -> usize {
    text.lines().filter(|l| l.contains(needle)).count()
}

#[test]
fn captures_both_target_ids_as_24_digit_strings() {
    let patched = patch_descriptor(DESCRIPTOR).expect("patch");

    let legacy = patched.targets.legacy.as_deref().expect("legacy id");
    let native = patched.targets.native.as_deref().expect("native id");
    assert_eq!(legacy, "123456789012345678901234");
    assert_eq!(native, "987654321098765432109876");
    assert!(legacy.len() == 24 && legacy.chars().all(|c| c.is_ascii_digit()));
    assert!(native.len() == 24 && native.chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn inserts_the_warning_block_once_per_configuration() {
    let patched = patch_descriptor(DESCRIPTOR).expect("patch");
    let text = patched.to_text();

    assert_eq!(count_containing(&text, "CLANG_WARN_COMMA"), 2);
    assert_eq!(count_containing(&text, "ONLY_ACTIVE_ARCH"), 2);

    // The block lands immediately after each buildSettings opener.
    let lines: Vec<&str> = text.lines().collect();
    for (idx, line) in lines.iter().enumerate() {
        if line.contains("buildSettings") {
            assert_eq!(lines[idx + 1], WARNING_SETTINGS[0]);
            assert_eq!(lines[idx + WARNING_SETTINGS.len()], WARNING_SETTINGS[24]);
        }
    }
}

#[test]
fn quotes_bare_values_throughout() {
    let patched = patch_descriptor(DESCRIPTOR).expect("patch");
    let text = patched.to_text();

    assert!(text.contains("\tarchiveVersion = \"1\";"));
    assert!(text.contains("\t\t\tname = \"Debug\";"));
    assert!(text.contains("\t\t\tbuildToolPath = \"./fbuild\";"));
    // Already quoted values stay untouched.
    assert!(text.contains("productType = \"com.apple.product-type.tool\";"));
}

#[test]
fn second_raw_run_duplicates_the_warning_block() {
    let first = patch_descriptor(DESCRIPTOR).expect("first run");
    let second = patch_descriptor(&first.to_text()).expect("second run");
    let text = second.to_text();

    // Quoting is idempotent, block insertion deliberately is not.
    assert_eq!(count_containing(&text, "CLANG_WARN_COMMA"), 4);
    assert_eq!(count_containing(&text, "archiveVersion = \"1\";"), 1);
    assert_eq!(second.targets, first.targets);
}

#[test]
fn missing_sections_capture_nothing_without_failing() {
    let no_legacy: String = DESCRIPTOR
        .lines()
        .filter(|l| !l.contains("PBXLegacyTarget") && !l.contains("buildToolPath"))
        .collect::<Vec<_>>()
        .join("\n");

    let patched = patch_descriptor(&no_legacy).expect("patch");
    assert_eq!(patched.targets.legacy, None);
    assert!(patched.targets.native.is_some());
}

#[test]
fn missing_configuration_section_inserts_nothing() {
    let no_configs: String = DESCRIPTOR
        .lines()
        .take_while(|l| !l.contains("Begin XCBuildConfiguration section"))
        .collect::<Vec<_>>()
        .join("\n");

    let patched = patch_descriptor(&no_configs).expect("patch");
    assert_eq!(count_containing(&patched.to_text(), "CLANG_WARN"), 0);
}
