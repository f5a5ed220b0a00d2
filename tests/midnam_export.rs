//! MIDNAM parsing and CSV export.

use ysfc_reader::midnam;

const DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<MIDINameDocument>
  <Author>Fixture</Author>
  <MasterDeviceNames>
    <Manufacturer>Yamaha</Manufacturer>
    <Model>Montage</Model>
    <ChannelNameSet Name="Montage Voices">
      <AvailableForChannels>
        <AvailableChannel Channel="1" Available="true"/>
      </AvailableForChannels>
      <PatchBank Name="Bank A">
        <MIDICommands>
          <ControlChange Control="0" Value="63"/>
          <ControlChange Control="32" Value="0"/>
          <ControlChange Control="0" Value="99"/>
        </MIDICommands>
        <PatchNameList>
          <Patch Number="1" Name="Pno:Grand Piano" ProgramChange="0"/>
          <Patch Number="2" Name="2"/>
          <Patch Number="3" Name="Raw" ProgramChange="2"/>
        </PatchNameList>
      </PatchBank>
      <PatchBank>
        <PatchNameList>
          <Patch Number="1" Name="Str:Violin" ProgramChange="40"/>
        </PatchNameList>
      </PatchBank>
    </ChannelNameSet>
    <ChannelNameSet Name="***">
      <PatchBank Name="Empty"/>
    </ChannelNameSet>
  </MasterDeviceNames>
</MIDINameDocument>
"#;

#[test]
fn collects_name_sets_banks_and_patches() {
    let sets = midnam::parse_name_sets(DOC).expect("document parses");
    assert_eq!(sets.len(), 2);

    let set = &sets[0];
    assert_eq!(set.name, "Montage Voices");
    assert_eq!(set.rows.len(), 3, "the number-for-a-name placeholder is dropped");

    let first = &set.rows[0];
    assert_eq!(first.bank, "Bank A");
    assert_eq!(first.msb.as_deref(), Some("63"), "only the first control 0 counts");
    assert_eq!(first.lsb.as_deref(), Some("0"));
    assert_eq!(first.program, Some(0));
    assert_eq!(first.category, "Pno");
    assert_eq!(first.name, "Grand Piano");

    let second = &set.rows[1];
    assert_eq!(second.bank, "Bank A");
    assert_eq!(second.category, "");
    assert_eq!(second.name, "Raw");
    assert_eq!(second.program, Some(2));

    let third = &set.rows[2];
    assert_eq!(third.bank, "<unnamed bank #2>");
    assert_eq!(third.msb, None);
    assert_eq!(third.lsb, None);
    assert_eq!(third.category, "Str");
    assert_eq!(third.name, "Violin");

    assert_eq!(sets[1].name, "***");
    assert!(sets[1].rows.is_empty());
}

#[test]
fn writes_one_csv_per_name_set() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let written = midnam::export(DOC, dir.path()).expect("export succeeds");
    assert_eq!(written.len(), 2);
    assert_eq!(written[0].file_name().unwrap(), "Montage Voices.csv");
    assert_eq!(
        written[1].file_name().unwrap(),
        "nameset-02.csv",
        "a name of pure file-name garbage falls back to a numbered file"
    );

    let table = std::fs::read_to_string(&written[0]).expect("read csv");
    let expected = "Bank,MSB,LSB,PC,Category,Name\n\
                    Bank A,63,0,0,Pno,Grand Piano\n\
                    Bank A,63,0,2,,Raw\n\
                    <unnamed bank #2>,,,40,Str,Violin\n";
    assert_eq!(table, expected);

    let empty = std::fs::read_to_string(&written[1]).expect("read csv");
    assert_eq!(empty, "Bank,MSB,LSB,PC,Category,Name\n", "empty sets still get a header");
}

#[test]
fn file_names_replace_unusable_characters() {
    let set = midnam::NameSet {
        name: "Live: Set/One".to_string(),
        rows: vec![],
    };
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = midnam::write_csv(&set, dir.path(), 1).expect("write csv");
    assert_eq!(path.file_name().unwrap(), "Live  Set One.csv");
}
