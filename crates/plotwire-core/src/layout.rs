use crate::datum::Datum;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Legend {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupMode {
    Group,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TickMode {
    Array,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisId {
    X,
    Y,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickmode: Option<TickMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickvals: Option<Vec<Datum>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticktext: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zeroline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showgrid: Option<bool>,
}

/// Figure-level layout record.
///
/// Axis records are created on first access and live as long as the figure; the bar/box group
/// modes only ever move from unset to `group`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    pub showlegend: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<GroupMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boxmode: Option<GroupMode>,
}

impl Layout {
    pub fn axis(&self, id: AxisId) -> Option<&Axis> {
        match id {
            AxisId::X => self.xaxis.as_ref(),
            AxisId::Y => self.yaxis.as_ref(),
        }
    }

    pub fn axis_mut(&mut self, id: AxisId) -> &mut Axis {
        let slot = match id {
            AxisId::X => &mut self.xaxis,
            AxisId::Y => &mut self.yaxis,
        };
        slot.get_or_insert_with(Axis::default)
    }

    pub fn set_legend_title(&mut self, text: impl Into<String>) {
        self.legend.get_or_insert_with(Legend::default).title = Some(Title { text: text.into() });
    }

    pub fn group_bars(&mut self) {
        self.barmode = Some(GroupMode::Group);
    }

    pub fn group_boxes(&mut self) {
        self.boxmode = Some(GroupMode::Group);
    }

    pub fn boxes_grouped(&self) -> bool {
        self.boxmode == Some(GroupMode::Group)
    }
}
