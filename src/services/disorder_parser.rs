//! Orphanet XML 解析 - 业务能力层
//!
//! 只负责"从一个 XML 文档中提取 (名称, OrphaCode)"能力，不关心目录遍历

use crate::error::ExtractError;
use crate::models::DiseaseRecord;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, error};

const DISORDER_TAG: &[u8] = b"Disorder";
const NAME_TAG: &[u8] = b"Name";
const CODE_TAG: &[u8] = b"OrphaCode";
const NAME_LANG: &str = "en";

/// 一个尚未闭合的 Disorder 元素
#[derive(Debug, Default)]
struct DisorderFrame {
    name: Option<String>,
    code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Code,
}

/// 正在收集文本的字段元素
struct Capture {
    field: Field,
    depth: usize,
    text: String,
}

/// 从 XML 文档中提取所有 Disorder 条目
///
/// 根元素之下的每个 `Disorder`（包括嵌套的）取其后代中文档顺序第一个
/// `lang="en"` 的 `Name` 和第一个 `OrphaCode`。缺少任一字段的条目被跳过。
/// 结果按 `Disorder` 起始标签的文档顺序排列。根元素本身不计入。
///
/// 文档格式错误时返回错误，不返回已解析的部分结果。
pub fn parse_disorders(xml: &str) -> Result<Vec<DiseaseRecord>, ExtractError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    // 按起始标签顺序占位，闭合时填充
    let mut slots: Vec<Option<DiseaseRecord>> = Vec::new();
    let mut frames: Vec<(usize, DisorderFrame)> = Vec::new();
    let mut open_elements: Vec<String> = Vec::new();
    let mut capture: Option<Capture> = None;
    let mut saw_root = false;
    let mut root_closed = false;

    loop {
        let event = reader.read_event().map_err(|source| ExtractError::Xml {
            position: reader.buffer_position() as u64,
            source,
        })?;

        match event {
            Event::Start(e) => {
                if root_closed {
                    return Err(outside_root(&reader));
                }
                saw_root = true;
                open_elements.push(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
                let depth = open_elements.len();

                if e.local_name().as_ref() == DISORDER_TAG {
                    if depth > 1 {
                        frames.push((slots.len(), DisorderFrame::default()));
                        slots.push(None);
                    }
                } else if capture.is_none() {
                    if let Some(field) = field_of(&e).map_err(|source| ExtractError::Xml {
                        position: reader.buffer_position() as u64,
                        source,
                    })? {
                        capture = Some(Capture {
                            field,
                            depth,
                            text: String::new(),
                        });
                    }
                }
            }
            Event::Empty(e) => {
                if root_closed {
                    return Err(outside_root(&reader));
                }
                saw_root = true;
                if open_elements.is_empty() {
                    root_closed = true;
                }
                // <Name lang="en"/> 视为存在但文本为空
                if e.local_name().as_ref() != DISORDER_TAG {
                    if let Some(field) = field_of(&e).map_err(|source| ExtractError::Xml {
                        position: reader.buffer_position() as u64,
                        source,
                    })? {
                        assign(&mut frames, field, "");
                    }
                }
            }
            Event::Text(e) => {
                if open_elements.is_empty() {
                    return Err(outside_root(&reader));
                }
                if let Some(c) = capture.as_mut() {
                    if c.depth == open_elements.len() {
                        let text = e.unescape().map_err(|source| ExtractError::Xml {
                            position: reader.buffer_position() as u64,
                            source,
                        })?;
                        c.text.push_str(&text);
                    }
                }
            }
            Event::CData(e) => {
                if open_elements.is_empty() {
                    return Err(outside_root(&reader));
                }
                if let Some(c) = capture.as_mut() {
                    if c.depth == open_elements.len() {
                        c.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                    }
                }
            }
            Event::End(e) => {
                let depth = open_elements.len();
                open_elements.pop();
                if open_elements.is_empty() {
                    root_closed = true;
                }

                if capture.as_ref().is_some_and(|c| c.depth == depth) {
                    if let Some(c) = capture.take() {
                        assign(&mut frames, c.field, c.text.trim());
                    }
                }

                if e.local_name().as_ref() == DISORDER_TAG && depth > 1 {
                    if let Some((slot, frame)) = frames.pop() {
                        if let (Some(name), Some(code)) = (frame.name, frame.code) {
                            slots[slot] = Some(DiseaseRecord::new(name, code));
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(element) = open_elements.pop() {
        return Err(ExtractError::Truncated { element });
    }
    if !saw_root {
        return Err(ExtractError::NoRoot);
    }

    Ok(slots.into_iter().flatten().collect())
}

fn outside_root(reader: &Reader<&[u8]>) -> ExtractError {
    ExtractError::OutsideRoot {
        position: reader.buffer_position() as u64,
    }
}

/// 判断元素是否是需要提取的字段
///
/// 只匹配不带前缀的 `lang` 属性，`xml:lang` 不算
fn field_of(e: &BytesStart<'_>) -> Result<Option<Field>, quick_xml::Error> {
    match e.local_name().as_ref() {
        CODE_TAG => Ok(Some(Field::Code)),
        NAME_TAG => {
            for attr in e.attributes() {
                let attr = attr.map_err(quick_xml::Error::from)?;
                if attr.key.as_ref() == b"lang" && attr.unescape_value()? == NAME_LANG {
                    return Ok(Some(Field::Name));
                }
            }
            Ok(None)
        }
        _ => Ok(None),
    }
}

/// 把字段值交给所有尚未拥有该字段的外层 Disorder
fn assign(frames: &mut [(usize, DisorderFrame)], field: Field, value: &str) {
    for (_, frame) in frames.iter_mut() {
        let target = match field {
            Field::Name => &mut frame.name,
            Field::Code => &mut frame.code,
        };
        if target.is_none() {
            *target = Some(value.to_string());
        }
    }
}

/// XML 声明中 `encoding` 属性的值（小写）
fn declared_encoding(bytes: &[u8]) -> Option<String> {
    let mut reader = Reader::from_reader(bytes);
    match reader.read_event() {
        Ok(Event::Decl(decl)) => decl
            .encoding()?
            .ok()
            .map(|enc| String::from_utf8_lossy(&enc).to_ascii_lowercase()),
        _ => None,
    }
}

/// 把文件字节解码为文本
///
/// Orphanet 的数据文件声明为 ISO-8859-1，无法按 UTF-8 解码时按声明的 Latin-1 处理
fn decode_document<'a>(bytes: &'a [u8], path: &Path) -> Result<Cow<'a, str>, ExtractError> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(Cow::Borrowed(text));
    }

    let declared_latin1 = matches!(
        declared_encoding(bytes).as_deref(),
        Some("iso-8859-1" | "iso_8859-1" | "latin-1" | "latin1")
    );

    if declared_latin1 {
        Ok(Cow::Owned(bytes.iter().map(|&b| b as char).collect()))
    } else {
        Err(ExtractError::Encoding {
            path: path.display().to_string(),
        })
    }
}

async fn read_and_parse(path: &Path) -> Result<Vec<DiseaseRecord>, ExtractError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ExtractError::ReadFile {
            path: path.display().to_string(),
            source,
        })?;
    let text = decode_document(&bytes, path)?;
    parse_disorders(&text)
}

/// 解析单个 Orphanet XML 文件
///
/// 读取或解析失败时记录错误并返回空列表
pub async fn parse_orphanet_file(path: &Path) -> Vec<DiseaseRecord> {
    match read_and_parse(path).await {
        Ok(records) => {
            debug!("{} 中提取到 {} 个疾病", path.display(), records.len());
            records
        }
        Err(e) => {
            error!("解析XML文件失败 {}: {}", path.display(), e);
            Vec::new()
        }
    }
}
