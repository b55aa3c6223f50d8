/*
** This file is a part of Xylem (streaming XML engine for Jabber/XMPP)
** Copyright (C) 2023-2026 Deniz Arkan
**
** Xylem is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use super::*;

fn scan(bytes: &[u8]) -> (Result<TokenKind, ScanError>, Token) {
    let mut token = Token::new();
    let kind = tokenize_content(bytes, 0, &mut token);
    (kind, token)
}

fn scan_cdata(bytes: &[u8]) -> (Result<TokenKind, ScanError>, Token) {
    let mut token = Token::new();
    let kind = tokenize_cdata_section(bytes, 0, &mut token);
    (kind, token)
}

fn expect_bad(bytes: &[u8]) {
    let (kind, _) = scan(bytes);
    match kind {
        Err(ScanError::BadToken(_)) => (),
        other => panic!("expected a lexical fault for {:?}, got {:?}", bytes, other),
    }
}

#[test]
fn start_tag_without_attributes() {
    let (kind, token) = scan(b"<stream>rest");
    assert_eq!(kind, Ok(TokenKind::StartTagNoAtts));
    assert_eq!(token.name_end(), 7);
    assert_eq!(token.token_end(), 8);
    assert!(token.attributes().is_empty());

    let (kind, token) = scan(b"<stream:stream>");
    assert_eq!(kind, Ok(TokenKind::StartTagNoAtts));
    assert_eq!(token.name_end(), 14);
    assert_eq!(token.token_end(), 15);

    let (kind, token) = scan(b"<a \t\n>");
    assert_eq!(kind, Ok(TokenKind::StartTagNoAtts));
    assert_eq!(token.name_end(), 2);
    assert_eq!(token.token_end(), 6);
}

#[test]
fn start_tag_with_attributes() {
    let buf = b"<msg id=\"1\" to='user@host'>";
    let (kind, token) = scan(buf);
    assert_eq!(kind, Ok(TokenKind::StartTagWithAtts));
    assert_eq!(token.name_end(), 4);
    assert_eq!(token.token_end(), buf.len());

    let atts = token.attributes();
    assert_eq!(atts.len(), 2);
    assert_eq!(&buf[atts[0].name_start..atts[0].name_end], b"id");
    assert_eq!(&buf[atts[0].value_start..atts[0].value_end], b"1");
    assert!(atts[0].normalized);
    assert_eq!(&buf[atts[1].name_start..atts[1].name_end], b"to");
    assert_eq!(&buf[atts[1].value_start..atts[1].value_end], b"user@host");
}

#[test]
fn attribute_with_reference_is_not_normalized() {
    let buf = b"<a b='x&amp;y'>";
    let (kind, token) = scan(buf);
    assert_eq!(kind, Ok(TokenKind::StartTagWithAtts));
    assert!(!token.attributes()[0].normalized);
}

#[test]
fn attribute_whitespace_around_equal() {
    let buf = b"<a x1 ='lala' x2\t= \t'bibi'>";
    let (kind, token) = scan(buf);
    assert_eq!(kind, Ok(TokenKind::StartTagWithAtts));
    let atts = token.attributes();
    assert_eq!(atts.len(), 2);
    assert_eq!(&buf[atts[0].value_start..atts[0].value_end], b"lala");
    assert_eq!(&buf[atts[1].value_start..atts[1].value_end], b"bibi");
}

#[test]
fn quotes_inside_other_quotes() {
    let buf = b"<tag a='12\"34' b=\"123'456\">";
    let (kind, token) = scan(buf);
    assert_eq!(kind, Ok(TokenKind::StartTagWithAtts));
    let atts = token.attributes();
    assert_eq!(&buf[atts[0].value_start..atts[0].value_end], b"12\"34");
    assert_eq!(&buf[atts[1].value_start..atts[1].value_end], b"123'456");
}

#[test]
fn empty_element_tags() {
    let (kind, token) = scan(b"<br/>");
    assert_eq!(kind, Ok(TokenKind::EmptyElementNoAtts));
    assert_eq!(token.name_end(), 3);
    assert_eq!(token.token_end(), 5);

    let (kind, token) = scan(b"<br />");
    assert_eq!(kind, Ok(TokenKind::EmptyElementNoAtts));
    assert_eq!(token.token_end(), 6);

    let buf = b"<presence from='a@b'/>";
    let (kind, token) = scan(buf);
    assert_eq!(kind, Ok(TokenKind::EmptyElementWithAtts));
    assert_eq!(token.token_end(), buf.len());
    assert_eq!(token.attributes().len(), 1);
}

#[test]
fn end_tags() {
    let (kind, token) = scan(b"</msg>");
    assert_eq!(kind, Ok(TokenKind::EndTag));
    assert_eq!(token.name_end(), 5);
    assert_eq!(token.token_end(), 6);

    let (kind, token) = scan(b"</msg \t>");
    assert_eq!(kind, Ok(TokenKind::EndTag));
    assert_eq!(token.name_end(), 5);
    assert_eq!(token.token_end(), 8);
}

#[test]
fn character_data_runs() {
    let (kind, token) = scan(b"hello<next>");
    assert_eq!(kind, Ok(TokenKind::DataChars));
    assert_eq!(token.token_end(), 5);

    let (kind, token) = scan(b"a&amp;b");
    assert_eq!(kind, Ok(TokenKind::DataChars));
    assert_eq!(token.token_end(), 1);

    let (kind, token) = scan(b"\nrest");
    assert_eq!(kind, Ok(TokenKind::DataNewline));
    assert_eq!(token.token_end(), 1);

    // a run at the window end is consumable; adjacent runs merge later
    let (kind, token) = scan(b"trailing text");
    assert_eq!(kind, Ok(TokenKind::DataChars));
    assert_eq!(token.token_end(), 13);
}

#[test]
fn references_decode() {
    let (kind, token) = scan(b"&amp;");
    assert_eq!(kind, Ok(TokenKind::CharRef));
    assert_eq!(token.ref_char(), Some('&'));
    assert_eq!(token.token_end(), 5);

    for (bytes, c) in [
        (&b"&lt;"[..], '<'),
        (&b"&gt;"[..], '>'),
        (&b"&quot;"[..], '"'),
        (&b"&apos;"[..], '\''),
    ] {
        let (kind, token) = scan(bytes);
        assert_eq!(kind, Ok(TokenKind::CharRef));
        assert_eq!(token.ref_char(), Some(c));
    }

    let (kind, token) = scan(b"&#65;");
    assert_eq!(kind, Ok(TokenKind::CharRef));
    assert_eq!(token.ref_char(), Some('A'));

    let (kind, token) = scan(b"&#x42;");
    assert_eq!(kind, Ok(TokenKind::CharRef));
    assert_eq!(token.ref_char(), Some('B'));

    let (kind, token) = scan(b"&#x3B;");
    assert_eq!(kind, Ok(TokenKind::CharRef));
    assert_eq!(token.ref_char(), Some(';'));
}

#[test]
fn supplementary_plane_reference_is_a_pair() {
    let (kind, token) = scan(b"&#x1F600;");
    assert_eq!(kind, Ok(TokenKind::CharPairRef));
    assert_eq!(token.ref_char(), Some('\u{1F600}'));
    assert_eq!(token.token_end(), 9);

    let (kind, token) = scan(b"&#xFFFD;");
    assert_eq!(kind, Ok(TokenKind::CharRef));
    assert_eq!(token.ref_char(), Some('\u{FFFD}'));
}

#[test]
fn bad_references() {
    expect_bad(b"&lala;");
    expect_bad(b"&nbsp;");
    expect_bad(b"&verylongname;");
    expect_bad(b"&#1a;");
    expect_bad(b"&#Xaa;");
    expect_bad(b"&#xa5g;");
    expect_bad(b"&#;");
    expect_bad(b"&#x;");
    expect_bad(b"&#8;");
    expect_bad(b"&#xD800;");
    expect_bad(b"&#xFFFF;");
    expect_bad(b"&#x110000;");
    expect_bad(b"&#x110000000000;");
}

#[test]
fn partial_tokens() {
    for bytes in [
        &b"<"[..],
        b"<msg id",
        b"<msg id=",
        b"<msg id='1",
        b"<msg ",
        b"<msg /",
        b"</msg ",
        b"</",
        b"&",
        b"&am",
        b"&#x1F60",
        b"<!",
        b"<![CDA",
        b"<?xml version='1.0'",
    ] {
        let (kind, _) = scan(bytes);
        assert_eq!(kind, Err(ScanError::Partial), "for {:?}", bytes);
    }
}

#[test]
fn extensible_names() {
    let (kind, _) = scan(b"<msg");
    assert_eq!(kind, Err(ScanError::Extensible));

    let (kind, _) = scan(b"</msg");
    assert_eq!(kind, Err(ScanError::Extensible));

    assert!(ScanError::Extensible.is_recoverable());
    assert!(ScanError::Partial.is_recoverable());
    assert!(!ScanError::BadToken("x").is_recoverable());
}

#[test]
fn duplicate_attribute_names_fault() {
    expect_bad(b"<a x='1' x='2'>");
    expect_bad(b"<a xmlns='u1' xmlns='u2'/>");

    // same prefix, different local part is fine
    let (kind, _) = scan(b"<a ns:x='1' ns:y='2'>");
    assert_eq!(kind, Ok(TokenKind::StartTagWithAtts));
}

#[test]
fn bad_tags() {
    expect_bad(b"< a>");
    expect_bad(b"<>");
    expect_bad(b"<1tag>");
    expect_bad(b"<a b></a>");
    expect_bad(b"<a b=></a>");
    expect_bad(b"<a b='1'c='2'>");
    expect_bad(b"<a b=1>");
    expect_bad(b"<a/ >");
    expect_bad(b"</a b='1'>");
    expect_bad(b"<a b='<'>");
    expect_bad(b"</>");
}

#[test]
fn unsupported_constructs_fault() {
    expect_bad(b"<!-- comment -->");
    expect_bad(b"<!DOCTYPE greeting SYSTEM 'hello.dtd'>");
    expect_bad(b"<?php echo ?>");
    expect_bad(b"<?xslt x?>");
    expect_bad(b"<![CDAXA[");
}

#[test]
fn xml_declaration() {
    let buf = b"<?xml version='1.0' encoding='UTF-8'?><stream>";
    let (kind, token) = scan(buf);
    assert_eq!(kind, Ok(TokenKind::XmlDecl));
    assert_eq!(token.token_end(), 38);
}

#[test]
fn cdata_section_markers() {
    let (kind, token) = scan(b"<![CDATA[text]]>");
    assert_eq!(kind, Ok(TokenKind::CdataSectOpen));
    assert_eq!(token.token_end(), 9);

    let (kind, token) = scan_cdata(b"]]>after");
    assert_eq!(kind, Ok(TokenKind::CdataSectClose));
    assert_eq!(token.token_end(), 3);
}

#[test]
fn cdata_section_body() {
    // markup characters are plain data inside a section
    let (kind, token) = scan_cdata(b"a <b> & c]]>");
    assert_eq!(kind, Ok(TokenKind::DataChars));
    assert_eq!(token.token_end(), 9);

    // a lone bracket is data too
    let (kind, token) = scan_cdata(b"] x]]>");
    assert_eq!(kind, Ok(TokenKind::DataChars));
    assert_eq!(token.token_end(), 1);

    let (kind, _) = scan_cdata(b"]");
    assert_eq!(kind, Err(ScanError::Partial));
    let (kind, _) = scan_cdata(b"]]");
    assert_eq!(kind, Err(ScanError::Partial));

    let (kind, token) = scan_cdata(b"\nx");
    assert_eq!(kind, Ok(TokenKind::DataNewline));
    assert_eq!(token.token_end(), 1);
}

#[test]
fn split_utf8_is_never_consumed() {
    let text = "héllo".as_bytes();
    // cut in the middle of the two-byte é
    let (kind, token) = scan(&text[..2]);
    assert_eq!(kind, Ok(TokenKind::DataChars));
    assert_eq!(token.token_end(), 1);

    // only the lead byte in the window: nothing consumable
    let (kind, _) = scan(&text[1..2]);
    assert_eq!(kind, Err(ScanError::Partial));

    // a four-byte character cut at every point
    let emoji = "\u{1F600}".as_bytes();
    for cut in 1..emoji.len() {
        let (kind, _) = scan(&emoji[..cut]);
        assert_eq!(kind, Err(ScanError::Partial), "cut at {}", cut);
    }
    let (kind, token) = scan(emoji);
    assert_eq!(kind, Ok(TokenKind::DataChars));
    assert_eq!(token.token_end(), 4);
}

#[test]
fn illegal_characters_fault() {
    expect_bad(b"ab\x00cd");
    expect_bad(b"ab\x19cd");
    let (kind, _) = scan(b"ab\tcd\r");
    assert_eq!(kind, Ok(TokenKind::DataChars));
}

#[test]
fn scanning_resumes_at_reported_end() {
    let buf = b"<a>text</a>";
    let mut token = Token::new();

    let kind = tokenize_content(buf, 0, &mut token);
    assert_eq!(kind, Ok(TokenKind::StartTagNoAtts));
    let off = token.token_end();

    let kind = tokenize_content(buf, off, &mut token);
    assert_eq!(kind, Ok(TokenKind::DataChars));
    assert_eq!(token.token_end(), 7);

    let kind = tokenize_content(buf, 7, &mut token);
    assert_eq!(kind, Ok(TokenKind::EndTag));
    assert_eq!(token.token_end(), buf.len());

    let kind = tokenize_content(buf, buf.len(), &mut token);
    assert_eq!(kind, Err(ScanError::Partial));
}

#[test]
fn normalize_values() {
    assert_eq!(normalize_attribute_value(b"plain").unwrap(), "plain");
    assert_eq!(normalize_attribute_value(b"").unwrap(), "");
    assert_eq!(normalize_attribute_value(b"a&amp;b").unwrap(), "a&b");
    assert_eq!(
        normalize_attribute_value(b"a&amp;b &#x42;&#65;").unwrap(),
        "a&b BA"
    );
    assert_eq!(
        normalize_attribute_value(b"&lt;&gt;&quot;&apos;").unwrap(),
        "<>\"'"
    );
    assert_eq!(
        normalize_attribute_value("çöğüşı".as_bytes()).unwrap(),
        "çöğüşı"
    );
    assert_eq!(
        normalize_attribute_value(b"&#x1F600;").unwrap(),
        "\u{1F600}"
    );

    assert!(normalize_attribute_value(b"&lala;").is_err());
    assert!(normalize_attribute_value(b"broken&").is_err());
    assert!(normalize_attribute_value(b"broken&amp").is_err());
    assert!(normalize_attribute_value(b"\xff\xfe").is_err());
}
