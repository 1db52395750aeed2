//! Grid model over a UIC 918.3 ticket layout (`U_TLAY`) with optional RCT2
//! reference templates shaded underneath.

pub const RCT2_WIDTH: usize = 72;
pub const RCT2_HEIGHT: usize = 18;

const RCT2_TYPE: &str = "RCT2";

const RCT2_GRID: [&str; RCT2_HEIGHT] = [
    "X             XXXX                                 X                   X",
    "X             XXXX                                 X                   X",
    "X   X    X  XXXXXX                                 X                   X",
    "X                                                  X                   X",
    "X     X     X                                      X     X     XXX     X",
    "X     X     X                                      X     X     XXX     X",
    "X     X     X                                      X     X     XXX     X",
    "X     X     X                                      X     X     XXX     X",
    "X                                                                      X",
    "X                                                                      X",
    "X                                                                      X",
    "X                                                                      X",
    "X                                                  XXXXXXXXXXXXXXXXXXXXX",
    "X                                                  X                   X",
    "X                                                  X                   X",
    "X              X              X                    X                   X",
    "XRRRRRRRRRRRX                 X                    X                   X",
    "X           X                 X     X        X     X                   X",
];

const RCT2_NRT_GRID: [&str; RCT2_HEIGHT] = [
    "X             XXXX                                 X                   X",
    "X             XXXX                                 X                   X",
    "X   X    X  XXXXXX                                 X                   X",
    "X                                                  X                   X",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX",
    "XGGGGGXGGGGGXGGGGGGGGGGGGGGGGGGGXXGGGGGGGGGGGGGGGGGXGGGGGXGGGGGXXXGGGGGX",
    "XGGGGGXGGGGGXGGGGGGGGGGGGGGGGGGGXXGGGGGGGGGGGGGGGGGXGGGGGXGGGGGXXXGGGGGX",
    "X                                                                      X",
    "X                                                                      X",
    "X                                                                      X",
    "X                                                                      X",
    "X  X                                               XXXXXXXXXXXXXXXXXXXXX",
    "X  X                                               X                   X",
    "X  X                                               X                   X",
    "X              X              X                    X                   X",
    "XRRRRRRRRRRRX                 X                    X                   X",
    "X           X                 X     X        X     X                   X",
];

const RCT2_IRT_GRID: [&str; RCT2_HEIGHT] = [
    "X             XXXX                                 X                   X",
    "X             XXXX                                 X                   X",
    "X   X    X  XXXXXX                                 X                   X",
    "X                                                  X                   X",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX",
    "XGGGGGXGGGGGXGGGGGGGGGGGGGGGGGGGXXGGGGGGGGGGGGGGGGGXGGGGGXGGGGGXXXGGGGGX",
    "XGGGGGXGGGGGXGGGGGGGGGGGGGGGGGGGXXGGGGGGGGGGGGGGGGGXGGGGGXGGGGGXXXGGGGGX",
    "X     XGGGGGXGGGX        XGGGXXX               XGGGX                   X",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX                   X                   X",
    "X                              X                   X                   X",
    "X                              X                   X                   X",
    "X  X                                X              XXXXXXXXXXXXXXXXXXXXX",
    "X  X                                X    X    X    X                   X",
    "X  X                                X    X    X    X                   X",
    "X              X              X                    X                   X",
    "XRRRRRRRRRRRX                 X                    X                   X",
    "X           X                 X     X        X     X                   X",
];

const RCT2_RES_GRID: [&str; RCT2_HEIGHT] = [
    "X             XXXX                                 X                   X",
    "X             XXXX                                 X                   X",
    "X   X    X  XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX                   X",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX                   X",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX",
    "XGGGGGXGGGGGXGGGGGGGGGGGGGGGGGGGXXGGGGGGGGGGGGGGGGGXGGGGGXGGGGGXXXGGGGGX",
    "XGGGGGXGGGGGXGGGGGGGGGGGGGGGGGGGXXGGGGGGGGGGGGGGGGGXGGGGGXGGGGGXXXGGGGGX",
    "X     XGGGGGXGGGX        XGGGXXX               XGGGX                   X",
    "XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX                   X                   X",
    "X                              X                   X                   X",
    "X                              X                   X                   X",
    "X  X                                               XXXXXXXXXXXXXXXXXXXXX",
    "X  X                                               X                   X",
    "X                                                  X                   X",
    "X              X              X                    X                   X",
    "XRRRRRRRRRRRX                 X                    X                   X",
    "X           X                 X     X        X     X                   X",
];

/// Shading of one template cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellShade {
    Static,
    Negative,
    Positive,
}

impl CellShade {
    fn from_marker(marker: u8) -> Option<Self> {
        match marker {
            b'X' => Some(CellShade::Static),
            b'R' => Some(CellShade::Negative),
            b'G' => Some(CellShade::Positive),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutTemplate {
    Rct2,
    Rct2Nrt,
    Rct2Irt,
    Rct2Res,
}

impl LayoutTemplate {
    pub const ALL: [LayoutTemplate; 4] = [
        LayoutTemplate::Rct2,
        LayoutTemplate::Rct2Nrt,
        LayoutTemplate::Rct2Irt,
        LayoutTemplate::Rct2Res,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LayoutTemplate::Rct2 => "RCT2",
            LayoutTemplate::Rct2Nrt => "RCT2 NRT",
            LayoutTemplate::Rct2Irt => "RCT2 IRT",
            LayoutTemplate::Rct2Res => "RCT2 RES",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|template| template.name() == name)
    }

    fn grid(self) -> &'static [&'static str; RCT2_HEIGHT] {
        match self {
            LayoutTemplate::Rct2 => &RCT2_GRID,
            LayoutTemplate::Rct2Nrt => &RCT2_NRT_GRID,
            LayoutTemplate::Rct2Irt => &RCT2_IRT_GRID,
            LayoutTemplate::Rct2Res => &RCT2_RES_GRID,
        }
    }

    pub fn shade_at(self, row: usize, column: usize) -> Option<CellShade> {
        let line = self.grid().get(row)?;
        line.as_bytes()
            .get(column)
            .and_then(|&marker| CellShade::from_marker(marker))
    }
}

/// Ticket layout as provided by the barcode parser.
pub trait TicketLayout {
    fn is_valid(&self) -> bool {
        true
    }

    fn layout_type(&self) -> &str;

    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// Text inside the given rectangle, one line per row.
    fn text(&self, row: usize, column: usize, width: usize, height: usize) -> String;
}

/// A positioned text field of a [`TextLayout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutField {
    pub row: usize,
    pub column: usize,
    pub width: usize,
    pub height: usize,
    pub text: String,
}

/// In-memory ticket layout made of text fields; later fields overwrite
/// earlier ones where they overlap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextLayout {
    pub layout_type: String,
    pub fields: Vec<LayoutField>,
}

impl TextLayout {
    pub fn new(layout_type: impl Into<String>) -> Self {
        TextLayout {
            layout_type: layout_type.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, row: usize, column: usize, width: usize, text: &str) -> Self {
        let height = text.lines().count().max(1);
        self.fields.push(LayoutField {
            row,
            column,
            width,
            height,
            text: text.to_string(),
        });
        self
    }

    fn char_at(&self, row: usize, column: usize) -> Option<char> {
        self.fields.iter().rev().find_map(|field| {
            let line = row.checked_sub(field.row).filter(|&r| r < field.height)?;
            let offset = column.checked_sub(field.column).filter(|&c| c < field.width)?;
            field.text.lines().nth(line)?.chars().nth(offset)
        })
    }
}

impl TicketLayout for TextLayout {
    fn layout_type(&self) -> &str {
        &self.layout_type
    }

    fn width(&self) -> usize {
        self.fields
            .iter()
            .map(|field| field.column + field.width)
            .max()
            .unwrap_or(0)
    }

    fn height(&self) -> usize {
        self.fields
            .iter()
            .map(|field| field.row + field.height)
            .max()
            .unwrap_or(0)
    }

    fn text(&self, row: usize, column: usize, width: usize, height: usize) -> String {
        (row..row + height)
            .map(|r| {
                let line: String = (column..column + width)
                    .map(|c| self.char_at(r, c).unwrap_or(' '))
                    .collect();
                line.trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Cell grid shown for a ticket layout, one character per cell.
#[derive(Default)]
pub struct LayoutGrid<'a> {
    layout: Option<&'a dyn TicketLayout>,
    template: Option<LayoutTemplate>,
}

impl<'a> LayoutGrid<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_layout(&mut self, layout: &'a dyn TicketLayout) {
        self.layout = Some(layout);
    }

    pub fn set_template(&mut self, template: Option<LayoutTemplate>) {
        self.template = template;
    }

    pub fn template(&self) -> Option<LayoutTemplate> {
        self.template
    }

    /// Selects the template named like the layout type, or none.
    pub fn select_template_for_layout(&mut self) {
        self.template = self
            .valid_layout()
            .and_then(|layout| LayoutTemplate::from_name(layout.layout_type()));
    }

    fn valid_layout(&self) -> Option<&'a dyn TicketLayout> {
        self.layout.filter(|layout| layout.is_valid())
    }

    fn is_rct2(&self) -> bool {
        self.valid_layout()
            .is_some_and(|layout| layout.layout_type() == RCT2_TYPE)
    }

    pub fn columns(&self) -> usize {
        let width = self.layout.map_or(0, |layout| layout.width());
        if self.is_rct2() {
            width.max(RCT2_WIDTH)
        } else {
            width
        }
    }

    pub fn rows(&self) -> usize {
        let height = self.layout.map_or(0, |layout| layout.height());
        if self.is_rct2() {
            height.max(RCT2_HEIGHT)
        } else {
            height
        }
    }

    pub fn cell_text(&self, row: usize, column: usize) -> Option<String> {
        self.valid_layout()
            .map(|layout| layout.text(row, column, 1, 1))
    }

    pub fn shade(&self, row: usize, column: usize) -> Option<CellShade> {
        self.valid_layout()?;
        self.template?.shade_at(row, column)
    }

    pub fn column_header(section: usize) -> String {
        (section % 10).to_string()
    }

    pub fn column_tooltip(section: usize) -> String {
        section.to_string()
    }

    pub fn row_header(section: usize) -> String {
        section.to_string()
    }
}
