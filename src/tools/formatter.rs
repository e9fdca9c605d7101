//! 输出格式化模块
//!
//! 负责在详细模式下以表格形式展示选中音频流的信息。

use crate::audio::StreamInfo;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table, presets::UTF8_FULL};

/// 生成流信息表格
pub fn format_stream_table(info: &StreamInfo, frames: Option<u64>) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new("属性 / Field"), Cell::new("值 / Value")]);

    let mut rows = vec![
        ("Codec Name", info.codec_name.clone()),
        ("Stream Index", info.stream_index.to_string()),
        ("Sample Format", info.sample_format.clone()),
        ("Sample Rate", format!("{} Hz", info.sample_rate)),
        ("Sample Size", format!("{} bytes", info.sample_size)),
        ("Channels", info.channels.to_string()),
    ];
    if let Some(frames) = frames {
        rows.push(("Frames", frames.to_string()));
        if info.sample_rate > 0 {
            let seconds = frames as f64 / info.sample_rate as f64;
            rows.push(("Duration", format!("{seconds:.3} s")));
        }
    }

    for (name, value) in rows {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }

    table.to_string()
}
