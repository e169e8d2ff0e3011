// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Conductor Contributors

use cond_core::{GroupId, Job, JobId, JobStatus};

use super::StoreInner;

impl StoreInner {
    pub fn insert_job(&mut self, job: Job) -> JobId {
        let id = job.id;
        self.jobs_by_group.entry(job.group_id).or_default().push(id);
        self.jobs_by_group_status.entry((job.group_id, job.status)).or_default().insert(id);
        self.jobs.insert(id, job);
        id
    }

    pub fn get_job(&self, id: JobId) -> Option<&Job> {
        self.jobs.get(&id)
    }

    pub fn get_job_mut(&mut self, id: JobId) -> Option<&mut Job> {
        self.jobs.get_mut(&id)
    }

    pub fn reindex_job_status(&mut self, id: JobId, group_id: GroupId, old: JobStatus, new: JobStatus) {
        if old == new {
            return;
        }
        if let Some(set) = self.jobs_by_group_status.get_mut(&(group_id, old)) {
            set.remove(&id);
        }
        self.jobs_by_group_status.entry((group_id, new)).or_default().insert(id);
    }

    pub fn list_jobs_by_group(&self, group_id: GroupId) -> Vec<&Job> {
        self.jobs_by_group.get(&group_id).into_iter().flatten().filter_map(|id| self.jobs.get(id)).collect()
    }

    pub fn count_jobs_by_group_status(&self, group_id: GroupId, status: JobStatus) -> usize {
        self.jobs_by_group_status.get(&(group_id, status)).map_or(0, |set| set.len())
    }

    pub fn remove_job(&mut self, id: JobId) -> Option<Job> {
        let job = self.jobs.remove(&id)?;
        if let Some(list) = self.jobs_by_group.get_mut(&job.group_id) {
            list.retain(|&j| j != id);
        }
        if let Some(set) = self.jobs_by_group_status.get_mut(&(job.group_id, job.status)) {
            set.remove(&id);
        }
        Some(job)
    }
}
