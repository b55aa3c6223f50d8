/*
** This file is a part of Xylem (streaming XML engine for Jabber/XMPP)
** Copyright (C) 2023-2026 Deniz Arkan
**
** Xylem is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

pub mod predefined {
    pub const LT: &str = "&lt;";
    pub const GT: &str = "&gt;";
    pub const AMP: &str = "&amp;";
    pub const APOS: &str = "&apos;";
    pub const QUOT: &str = "&quot;";
}

/// Writes `s` with the five markup characters replaced by their
/// predefined entity references.
pub fn escape_to<W: std::fmt::Write>(s: &str, w: &mut W) -> std::fmt::Result {
    for c in s.chars() {
        match c {
            '<' => w.write_str(predefined::LT)?,
            '>' => w.write_str(predefined::GT)?,
            '&' => w.write_str(predefined::AMP)?,
            '\'' => w.write_str(predefined::APOS)?,
            '"' => w.write_str(predefined::QUOT)?,
            _ => w.write_char(c)?,
        }
    }

    Ok(())
}

pub fn escaped_size(s: &str) -> usize {
    let mut size = 0;
    for c in s.chars() {
        match c {
            '<' => size += predefined::LT.len(),
            '>' => size += predefined::GT.len(),
            '&' => size += predefined::AMP.len(),
            '\'' => size += predefined::APOS.len(),
            '"' => size += predefined::QUOT.len(),
            _ => size += c.len_utf8(),
        }
    }

    size
}
