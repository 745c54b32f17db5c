/*!
 * Tests for overlay style compilation
 */

use subburn::style::{alignment_code, color_to_hex, compile, StyleSpec};

#[test]
fn test_compile_withDefaults_shouldMatchExpectedBlock() {
    let style = compile(&StyleSpec::default());
    assert_eq!(
        style,
        "FontSize=24,FontName=Arial,PrimaryColour=&HFFFFFF&,OutlineColour=&H000000&,\
         MarginL=50,MarginR=50,MarginV=20,Outline=1,Shadow=1,Alignment=2,BorderStyle=1,Outline=1"
    );
}

#[test]
fn test_compile_withSameSpecTwice_shouldBeDeterministic() {
    let spec = StyleSpec {
        font_size: 32,
        primary_color: "yellow".to_string(),
        background_color: "black".to_string(),
        ..StyleSpec::default()
    };
    assert_eq!(compile(&spec), compile(&spec));
}

#[test]
fn test_compile_withNoBackground_shouldNotEmitBackColour() {
    let style = compile(&StyleSpec::default());
    assert!(!style.contains("BackColour"));
    assert!(style.contains("BorderStyle=1"));
}

#[test]
fn test_compile_withBackground_shouldEmitBackColourAndBoxBorder() {
    let spec = StyleSpec {
        background_color: "yellow".to_string(),
        ..StyleSpec::default()
    };
    let style = compile(&spec);
    assert!(style.contains("BackColour=&H00FFFF&"));
    assert!(style.contains("BorderStyle=3"));
}

#[test]
fn test_compile_withTopCenterPosition_shouldUseAlignmentEight() {
    let spec = StyleSpec {
        position: "top center".to_string(),
        ..StyleSpec::default()
    };
    assert!(compile(&spec).contains("Alignment=8"));
}

#[test]
fn test_compile_withUnknownPosition_shouldFallBackToBottom() {
    let spec = StyleSpec {
        position: "somewhere else".to_string(),
        ..StyleSpec::default()
    };
    assert!(compile(&spec).contains("Alignment=2"));
}

#[test]
fn test_compile_withUnknownColor_shouldFallBackToWhite() {
    let spec = StyleSpec {
        primary_color: "mauve".to_string(),
        ..StyleSpec::default()
    };
    assert!(compile(&spec).contains("PrimaryColour=&HFFFFFF&"));
}

#[test]
fn test_color_to_hex_withKnownNames_shouldUseBgrTable() {
    assert_eq!(color_to_hex("white"), "&HFFFFFF&");
    assert_eq!(color_to_hex("yellow"), "&H00FFFF&");
    assert_eq!(color_to_hex("black"), "&H000000&");
    assert_eq!(color_to_hex("green"), "&H00FF00&");
    assert_eq!(color_to_hex("cyan"), "&HFFFF00&");
    assert_eq!(color_to_hex("gray"), "&H808080&");
    assert_eq!(color_to_hex("none"), "");
}

#[test]
fn test_color_to_hex_withMixedCase_shouldStillResolve() {
    assert_eq!(color_to_hex("Yellow"), "&H00FFFF&");
}

#[test]
fn test_alignment_code_withPositions_shouldMapToOverlayCodes() {
    assert_eq!(alignment_code("top center"), 8);
    assert_eq!(alignment_code("bottom"), 2);
    assert_eq!(alignment_code("anything"), 2);
}
